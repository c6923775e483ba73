//! Number lists (`tableValues`, `kernelMatrix`, `rotate`, ...).

use std::fmt::Write as _;

use vgdom_parser::{NumberListHandler, NumberListParser, ParseError};

use crate::dynamic::AnyItem;
use crate::error::ListError;
use crate::item::Item;
use crate::kind::{ListHandler, ListKind};
use crate::list::List;

/// Separator for a number list.
pub const NUMBER_LIST_SEPARATOR: &str = " ";

/// Finite `f32` items, space separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {}

pub type NumberItem = Item<NumberKind>;
pub type NumberList = List<NumberKind>;

impl ListKind for NumberKind {
    type Value = f32;

    const ITEM_KIND: &'static str = "number";
    const SEPARATOR: &'static str = NUMBER_LIST_SEPARATOR;

    fn parse(text: &str, handler: &mut dyn ListHandler<f32>) -> Result<(), ParseError> {
        let mut builder = NumberListBuilder {
            handler,
            current: 0.0,
        };
        NumberListParser::new().parse(text, &mut builder)
    }

    /// Shortest text that parses back to the same `f32` (`2.0` -> `"2"`).
    fn format(value: &f32, out: &mut String) {
        let _ = write!(out, "{value}");
    }

    fn validate(value: &f32) -> Result<(), ListError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ListError::invalid_value(Self::ITEM_KIND, value))
        }
    }

    /// Bitwise, so `-0.0` over `0.0` is a change (it serializes as `"-0"`).
    fn same_value(current: &f32, new: &f32) -> bool {
        current.to_bits() == new.to_bits()
    }

    fn narrow(item: AnyItem) -> Result<NumberItem, AnyItem> {
        match item {
            AnyItem::Number(item) => Ok(item),
            other => Err(other),
        }
    }

    fn widen(item: NumberItem) -> AnyItem {
        AnyItem::Number(item)
    }
}

/// Adapts tokenizer events to list events, one item per numeral.
struct NumberListBuilder<'a> {
    handler: &'a mut dyn ListHandler<f32>,
    current: f32,
}

impl NumberListHandler for NumberListBuilder<'_> {
    fn start_number_list(&mut self) {
        self.handler.start_list();
    }

    fn start_number(&mut self) {
        self.current = 0.0;
    }

    fn number_value(&mut self, value: f32) {
        self.current = value;
    }

    fn end_number(&mut self) {
        self.handler.item(self.current);
    }

    fn end_number_list(&mut self) {
        self.handler.end_list();
    }
}
