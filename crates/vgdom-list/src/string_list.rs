//! String lists (`requiredFeatures`, `requiredExtensions`, `systemLanguage`).
//!
//! Items are bare tokens: non-empty, without whitespace or commas, so that
//! any list survives a write-back/reparse cycle regardless of separator.

use vgdom_parser::{ParseError, StringListHandler, StringListParser};

use crate::dynamic::AnyItem;
use crate::error::ListError;
use crate::item::Item;
use crate::kind::{ListHandler, ListKind};
use crate::list::List;

/// Default separator for a string list.
pub const STRING_LIST_SEPARATOR: &str = " ";

/// Separator used by comma-separated string lists (`systemLanguage`).
pub const COMMA_SEPARATOR: &str = ", ";

/// Token items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {}

pub type StringItem = Item<StringKind>;
pub type StringList = List<StringKind>;

impl StringItem {
    /// Convenience constructor from anything string-like.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new(token.into())
    }
}

impl ListKind for StringKind {
    type Value = String;

    const ITEM_KIND: &'static str = "string";
    const SEPARATOR: &'static str = STRING_LIST_SEPARATOR;

    fn parse(text: &str, handler: &mut dyn ListHandler<String>) -> Result<(), ParseError> {
        StringListParser::new().parse(text, &mut StringListBuilder { handler })
    }

    fn format(value: &String, out: &mut String) {
        out.push_str(value);
    }

    fn validate(value: &String) -> Result<(), ListError> {
        let separator_free = !value
            .bytes()
            .any(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b','));
        if !value.is_empty() && separator_free {
            Ok(())
        } else {
            Err(ListError::invalid_value(Self::ITEM_KIND, value))
        }
    }

    fn narrow(item: AnyItem) -> Result<StringItem, AnyItem> {
        match item {
            AnyItem::String(item) => Ok(item),
            other => Err(other),
        }
    }

    fn widen(item: StringItem) -> AnyItem {
        AnyItem::String(item)
    }
}

struct StringListBuilder<'a> {
    handler: &'a mut dyn ListHandler<String>,
}

impl StringListHandler for StringListBuilder<'_> {
    fn start_string_list(&mut self) {
        self.handler.start_list();
    }

    fn string_value(&mut self, value: &str) {
        self.handler.item(value.to_owned());
    }

    fn end_string_list(&mut self) {
        self.handler.end_list();
    }
}
