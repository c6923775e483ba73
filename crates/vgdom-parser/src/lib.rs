#![forbid(unsafe_code)]

//! Value-token parsers for list-valued attributes.
//!
//! # Role in vgdom
//! `vgdom-parser` is the leaf of the workspace. It turns attribute text such
//! as `"1 2.5,-3e2"` into a stream of handler events and reports malformed
//! input with a byte position. It knows nothing about lists, items, or owning
//! nodes; `vgdom-list` adapts these events into list items.
//!
//! # Grammar
//!
//! Tokens are separated by *comma-wsp*: any run of whitespace, optionally
//! containing one comma. Leading and trailing whitespace is ignored, and a
//! single trailing comma is tolerated.
//!
//! ```text
//! list    ::= wsp* (token (comma-wsp token)* comma-wsp?)?
//! number  ::= sign? (digits ('.' digits?)? | '.' digits) (('e'|'E') sign? digits)?
//! string  ::= [^ \t\r\n,]+
//! ```
//!
//! Numbers may abut when the second one starts with a sign or a dot, so
//! `"1-2"` is `[1, -2]` and `"1.5.5"` is `[1.5, 0.5]`.

pub mod error;
pub mod number_list;
pub mod string_list;

pub use error::{ParseError, ParseErrorKind};
pub use number_list::{NumberListHandler, NumberListParser, parse_number_list};
pub use string_list::{StringListHandler, StringListParser, parse_string_list};

/// SVG whitespace: space, tab, carriage return, line feed.
#[inline]
pub(crate) fn is_wsp(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Advance `pos` past a comma-wsp separator.
///
/// Returns the position of the next token (or `bytes.len()`).
pub(crate) fn skip_comma_wsp(bytes: &[u8], mut pos: usize) -> usize {
    pos = skip_wsp(bytes, pos);
    if bytes.get(pos) == Some(&b',') {
        pos = skip_wsp(bytes, pos + 1);
    }
    pos
}

#[inline]
pub(crate) fn skip_wsp(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).copied().is_some_and(is_wsp) {
        pos += 1;
    }
    pos
}
