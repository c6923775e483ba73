//! Number-list tokenizer.
//!
//! The parser walks the text once and reports each numeral to a
//! [`NumberListHandler`] as it is recognized. Each numeral is lexed by a small
//! deterministic state machine and then converted with `str::parse::<f32>`.
//!
//! # Failure Modes
//!
//! | Input | Result |
//! |-------|--------|
//! | `""`, `"   "` | empty list (start/end events only) |
//! | `"1,,2"`, `",1"` | `UnexpectedChar(',')` |
//! | `"1e"`, `"-"` | `UnexpectedEnd` |
//! | `"1e99"` | `NumberOutOfRange` |
//!
//! Events already delivered before an error are not retracted; consumers
//! that need all-or-nothing semantics must buffer until `parse` returns `Ok`.

use crate::error::{ParseError, ParseErrorKind};
use crate::{skip_comma_wsp, skip_wsp};

/// Receiver for number-list parse events.
///
/// Events arrive in order: `start_number_list`, then for every numeral
/// `start_number`, `number_value`, `end_number`, and finally
/// `end_number_list` (only when the whole input is well-formed).
pub trait NumberListHandler {
    fn start_number_list(&mut self) {}
    fn start_number(&mut self) {}
    fn number_value(&mut self, value: f32);
    fn end_number(&mut self) {}
    fn end_number_list(&mut self) {}
}

impl NumberListHandler for Vec<f32> {
    fn number_value(&mut self, value: f32) {
        self.push(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    Integer,
    LeadingDot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl State {
    fn is_accepting(self) -> bool {
        matches!(self, Self::Integer | Self::Fraction | Self::ExponentDigits)
    }
}

/// Number-list parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberListParser;

impl NumberListParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse `text`, reporting numerals to `handler`.
    pub fn parse<H>(&self, text: &str, handler: &mut H) -> Result<(), ParseError>
    where
        H: NumberListHandler + ?Sized,
    {
        let bytes = text.as_bytes();
        handler.start_number_list();
        let mut pos = skip_wsp(bytes, 0);
        while pos < bytes.len() {
            handler.start_number();
            let (value, end) = scan_number(text, pos)?;
            handler.number_value(value);
            handler.end_number();
            pos = skip_comma_wsp(bytes, end);
        }
        handler.end_number_list();
        Ok(())
    }
}

/// Parse a number list into a vector.
pub fn parse_number_list(text: &str) -> Result<Vec<f32>, ParseError> {
    let mut out = Vec::new();
    NumberListParser::new().parse(text, &mut out)?;
    Ok(out)
}

/// Lex one numeral starting at `start`; returns its value and end offset.
fn scan_number(text: &str, start: usize) -> Result<(f32, usize), ParseError> {
    let bytes = text.as_bytes();
    let mut state = State::Start;
    let mut pos = start;

    while let Some(&b) = bytes.get(pos) {
        let next = match (state, b) {
            (State::Start, b'+' | b'-') => State::Sign,
            (State::Start | State::Sign | State::Integer, b'0'..=b'9') => State::Integer,
            (State::Start | State::Sign, b'.') => State::LeadingDot,
            (State::Integer, b'.') => State::Fraction,
            (State::LeadingDot | State::Fraction, b'0'..=b'9') => State::Fraction,
            (State::Integer | State::Fraction, b'e' | b'E') => State::Exponent,
            (State::Exponent, b'+' | b'-') => State::ExponentSign,
            (State::Exponent | State::ExponentSign | State::ExponentDigits, b'0'..=b'9') => {
                State::ExponentDigits
            }
            _ if state.is_accepting() => break,
            _ => return Err(ParseError::at(text, pos)),
        };
        state = next;
        pos += 1;
    }

    if !state.is_accepting() {
        return Err(ParseError::at(text, pos));
    }

    let lexeme = &text[start..pos];
    let value: f32 = lexeme
        .parse()
        .map_err(|_| ParseError::at(text, start))?;
    if !value.is_finite() {
        return Err(ParseError::new(ParseErrorKind::NumberOutOfRange, start));
    }
    Ok((value, pos))
}
