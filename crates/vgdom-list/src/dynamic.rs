//! Kind-erased access to a bound list.
//!
//! [`DynList`] lets generic DOM code drive a list without knowing its item
//! kind at compile time. Every input is narrowed to the list's own kind
//! before anything is touched; a mismatch fails with a type error and leaves
//! the list as it was.

use crate::error::ListError;
use crate::kind::ListKind;
use crate::list::List;
use crate::number_list::NumberItem;
use crate::string_list::StringItem;

/// An item of any supported kind.
#[derive(Clone, Debug)]
pub enum AnyItem {
    Number(NumberItem),
    String(StringItem),
}

impl AnyItem {
    /// Kind name as reported in type errors.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }

    /// The number item, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<&NumberItem> {
        match self {
            Self::Number(item) => Some(item),
            Self::String(_) => None,
        }
    }

    /// The string item, if this is one.
    #[must_use]
    pub fn as_string(&self) -> Option<&StringItem> {
        match self {
            Self::String(item) => Some(item),
            Self::Number(_) => None,
        }
    }
}

impl From<NumberItem> for AnyItem {
    fn from(item: NumberItem) -> Self {
        Self::Number(item)
    }
}

impl From<StringItem> for AnyItem {
    fn from(item: StringItem) -> Self {
        Self::String(item)
    }
}

/// Object-safe view of a [`List`] over [`AnyItem`] values.
pub trait DynList {
    /// Kind of item this list accepts.
    fn item_kind(&self) -> &'static str;
    fn attribute(&self) -> &str;
    fn len(&self) -> Result<usize, ListError>;
    fn is_empty(&self) -> Result<bool, ListError> {
        Ok(self.len()? == 0)
    }
    fn value_as_string(&self) -> Result<String, ListError>;
    fn initialize(&self, item: AnyItem) -> Result<AnyItem, ListError>;
    fn get_item(&self, index: usize) -> Result<AnyItem, ListError>;
    fn insert_item_before(&self, item: AnyItem, index: isize) -> Result<AnyItem, ListError>;
    fn replace_item(&self, item: AnyItem, index: usize) -> Result<AnyItem, ListError>;
    fn remove_item(&self, index: usize) -> Result<AnyItem, ListError>;
    fn append_item(&self, item: AnyItem) -> Result<AnyItem, ListError>;
    fn clear(&self) -> Result<(), ListError>;
    fn invalidate(&self);
}

fn narrow<K: ListKind>(item: AnyItem) -> Result<crate::item::Item<K>, ListError> {
    K::narrow(item).map_err(|other| K::wrong_type(other.kind_name()))
}

impl<K: ListKind> DynList for List<K> {
    fn item_kind(&self) -> &'static str {
        K::ITEM_KIND
    }

    fn attribute(&self) -> &str {
        List::attribute(self)
    }

    fn len(&self) -> Result<usize, ListError> {
        List::len(self)
    }

    fn value_as_string(&self) -> Result<String, ListError> {
        List::value_as_string(self)
    }

    fn initialize(&self, item: AnyItem) -> Result<AnyItem, ListError> {
        List::initialize(self, narrow::<K>(item)?).map(K::widen)
    }

    fn get_item(&self, index: usize) -> Result<AnyItem, ListError> {
        List::get_item(self, index).map(K::widen)
    }

    fn insert_item_before(&self, item: AnyItem, index: isize) -> Result<AnyItem, ListError> {
        List::insert_item_before(self, narrow::<K>(item)?, index).map(K::widen)
    }

    fn replace_item(&self, item: AnyItem, index: usize) -> Result<AnyItem, ListError> {
        List::replace_item(self, narrow::<K>(item)?, index).map(K::widen)
    }

    fn remove_item(&self, index: usize) -> Result<AnyItem, ListError> {
        List::remove_item(self, index).map(K::widen)
    }

    fn append_item(&self, item: AnyItem) -> Result<AnyItem, ListError> {
        List::append_item(self, narrow::<K>(item)?).map(K::widen)
    }

    fn clear(&self) -> Result<(), ListError> {
        List::clear(self)
    }

    fn invalidate(&self) {
        List::invalidate(self);
    }
}
