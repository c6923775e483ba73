//! The owning node: attribute storage plus the lists bound to it.
//!
//! A node stores attribute text and hands out at most one list per attribute
//! (and one read-only animated view). It is the only external source of
//! invalidation: setting or removing an attribute marks its lists stale,
//! while text written back by a list only refreshes the animated view.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::dynamic::DynList;
use crate::error::ListError;
use crate::kind::ListKind;
use crate::list::{List, ListCore, ListOptions};
use crate::number_list::{NumberKind, NumberList};
use crate::string_list::{StringKind, StringList};

/// Attribute storage a list is bound to.
pub trait AttributeHost {
    /// Current text of `name`, or `None` when the attribute is absent.
    fn attribute_text(&self, name: &str) -> Option<String>;

    /// Store text produced by a list. Must not invalidate the writing list.
    fn write_back(&self, name: &str, text: &str);
}

/// Node-side handle to a bound list.
pub(crate) trait AttributeBinding {
    fn invalidate(&self);
    fn item_kind(&self) -> &'static str;
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
    fn to_dyn_list(self: Rc<Self>) -> Box<dyn DynList>;
}

type Bindings = RefCell<FxHashMap<String, Rc<dyn AttributeBinding>>>;

struct ElementInner {
    tag: String,
    attributes: RefCell<FxHashMap<String, String>>,
    base_lists: Bindings,
    animated_lists: Bindings,
}

/// A minimal document element.
///
/// Cloning an `Element` creates another handle to the same node.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementInner>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.inner.attributes.borrow().keys().cloned().collect();
        names.sort_unstable();
        f.debug_struct("Element")
            .field("tag", &self.inner.tag)
            .field("attributes", &names)
            .finish()
    }
}

impl Element {
    /// A new element with no attributes and no bound lists.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                tag: tag.into(),
                attributes: RefCell::new(FxHashMap::default()),
                base_lists: RefCell::new(FxHashMap::default()),
                animated_lists: RefCell::new(FxHashMap::default()),
            }),
        }
    }

    /// Element name, e.g. `"feFuncR"`.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Current text of `name`, including text written back by lists.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.borrow().get(name).cloned()
    }

    /// Whether `name` is set.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.attributes.borrow().contains_key(name)
    }

    /// Set attribute text from outside the list API.
    ///
    /// Any list bound to `name` becomes stale and reparses on its next read.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.inner
            .attributes
            .borrow_mut()
            .insert(name.to_owned(), value.into());
        self.inner.invalidate_bound(name);
    }

    /// Remove an attribute, returning its previous text.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let previous = self.inner.attributes.borrow_mut().remove(name);
        self.inner.invalidate_bound(name);
        previous
    }

    /// The number list bound to `name`, created on first use.
    pub fn number_list(&self, name: &str) -> Result<NumberList, ListError> {
        self.typed_list::<NumberKind>(name, ListOptions::new(), false)
    }

    /// Read-only animated view of the number list bound to `name`.
    pub fn animated_number_list(&self, name: &str) -> Result<NumberList, ListError> {
        self.typed_list::<NumberKind>(name, ListOptions::new().read_only(true), true)
    }

    /// The string list bound to `name`, created on first use.
    pub fn string_list(&self, name: &str) -> Result<StringList, ListError> {
        self.typed_list::<StringKind>(name, ListOptions::new(), false)
    }

    /// Like [`string_list`](Self::string_list) with a custom write-back
    /// separator. The separator only applies when the list is created.
    pub fn string_list_with_separator(
        &self,
        name: &str,
        separator: &'static str,
    ) -> Result<StringList, ListError> {
        self.typed_list::<StringKind>(name, ListOptions::new().separator(separator), false)
    }

    /// Kind-erased access to the list already bound to `name`.
    #[must_use]
    pub fn dyn_list(&self, name: &str) -> Option<Box<dyn DynList>> {
        let binding = self.inner.base_lists.borrow().get(name).cloned()?;
        Some(binding.to_dyn_list())
    }

    fn typed_list<K: ListKind>(
        &self,
        name: &str,
        options: ListOptions,
        animated: bool,
    ) -> Result<List<K>, ListError> {
        let bindings = if animated {
            &self.inner.animated_lists
        } else {
            &self.inner.base_lists
        };
        let existing = bindings.borrow().get(name).cloned();
        if let Some(binding) = existing {
            let found = binding.item_kind();
            return binding
                .into_any()
                .downcast::<ListCore<K>>()
                .map(List::from_core)
                .map_err(|_| K::wrong_type(found));
        }

        let weak: Weak<ElementInner> = Rc::downgrade(&self.inner);
        let host: Weak<dyn AttributeHost> = weak;
        let list = List::<K>::with_options(host, name, options);
        bindings
            .borrow_mut()
            .insert(name.to_owned(), list.binding());
        tracing::trace!(
            tag = %self.inner.tag,
            attribute = name,
            kind = K::ITEM_KIND,
            animated,
            "list bound"
        );
        Ok(list)
    }
}

impl ElementInner {
    fn invalidate_bound(&self, name: &str) {
        let base = self.base_lists.borrow().get(name).cloned();
        let animated = self.animated_lists.borrow().get(name).cloned();
        for binding in base.into_iter().chain(animated) {
            binding.invalidate();
        }
    }
}

impl AttributeHost for ElementInner {
    fn attribute_text(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn write_back(&self, name: &str, text: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_owned(), text.to_owned());
        let animated = self.animated_lists.borrow().get(name).cloned();
        if let Some(binding) = animated {
            binding.invalidate();
        }
    }
}

impl AttributeHost for Element {
    fn attribute_text(&self, name: &str) -> Option<String> {
        self.inner.attribute_text(name)
    }

    fn write_back(&self, name: &str, text: &str) {
        self.inner.write_back(name, text);
    }
}
