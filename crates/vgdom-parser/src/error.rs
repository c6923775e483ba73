//! Parse errors with byte positions.

use std::fmt;

/// What went wrong while tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseErrorKind {
    /// A character that cannot start or continue a token here.
    UnexpectedChar(char),
    /// Input ended in the middle of a token (e.g. `"1e"` or `"-"`).
    UnexpectedEnd,
    /// A well-formed numeral that does not fit a finite `f32`.
    NumberOutOfRange,
}

/// A malformed-input report.
///
/// `position` is a byte offset into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Error for the byte at `position` in `text`, or end-of-input past it.
    pub(crate) fn at(text: &str, position: usize) -> Self {
        match text.get(position..).and_then(|rest| rest.chars().next()) {
            Some(ch) => Self::new(ParseErrorKind::UnexpectedChar(ch), position),
            None => Self::new(ParseErrorKind::UnexpectedEnd, text.len()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedChar(ch) => {
                write!(f, "unexpected character {ch:?} at byte {}", self.position)
            }
            ParseErrorKind::UnexpectedEnd => {
                write!(f, "unexpected end of input at byte {}", self.position)
            }
            ParseErrorKind::NumberOutOfRange => {
                write!(f, "number out of range at byte {}", self.position)
            }
        }
    }
}

impl std::error::Error for ParseError {}
