//! Specialization seam between the generic list engine and an item type.

use std::fmt;

use vgdom_parser::ParseError;

use crate::dynamic::AnyItem;
use crate::error::ListError;
use crate::item::Item;

/// Receiver for list-level parse events.
///
/// A specialization adapts its tokenizer's events into these three calls.
pub trait ListHandler<V> {
    fn start_list(&mut self);
    fn item(&mut self, value: V);
    fn end_list(&mut self);
}

/// Binds the generic engine to a concrete item type.
pub trait ListKind: Sized + 'static {
    /// The value stored in each item.
    type Value: Clone + PartialEq + fmt::Debug + 'static;

    /// Kind name used in type errors (e.g. `"number"`).
    const ITEM_KIND: &'static str;

    /// Separator placed between items on write-back.
    const SEPARATOR: &'static str;

    /// Tokenize `text`, reporting each value to `handler`.
    fn parse(text: &str, handler: &mut dyn ListHandler<Self::Value>) -> Result<(), ParseError>;

    /// Append the canonical text form of `value` to `out`.
    fn format(value: &Self::Value, out: &mut String);

    /// Reject values that would not survive a write-back/reparse cycle.
    fn validate(_value: &Self::Value) -> Result<(), ListError> {
        Ok(())
    }

    /// Whether storing `new` over `current` would change nothing, including
    /// the serialized text.
    fn same_value(current: &Self::Value, new: &Self::Value) -> bool {
        current == new
    }

    /// Error raised when an item of kind `found` is offered to this list.
    fn wrong_type(found: &'static str) -> ListError {
        ListError::wrong_type(Self::ITEM_KIND, found)
    }

    /// Downcast a dynamic item, handing it back unchanged on mismatch.
    fn narrow(item: AnyItem) -> Result<Item<Self>, AnyItem>;

    /// Upcast a typed item.
    fn widen(item: Item<Self>) -> AnyItem;
}

/// Accumulates parsed values so a rebuild is all-or-nothing.
#[derive(Debug)]
pub(crate) struct ValueBuilder<V> {
    values: Vec<V>,
    complete: bool,
}

impl<V> ValueBuilder<V> {
    pub(crate) fn new() -> Self {
        Self {
            values: Vec::new(),
            complete: false,
        }
    }

    /// Values of a fully parsed list, or `None` if `end_list` never arrived.
    pub(crate) fn finish(self) -> Option<Vec<V>> {
        self.complete.then_some(self.values)
    }
}

impl<V> ListHandler<V> for ValueBuilder<V> {
    fn start_list(&mut self) {
        self.values.clear();
        self.complete = false;
    }

    fn item(&mut self, value: V) {
        self.values.push(value);
    }

    fn end_list(&mut self) {
        self.complete = true;
    }
}
