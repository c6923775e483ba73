//! String-list tokenizer.
//!
//! A token is a maximal run of characters that are neither whitespace nor a
//! comma. Separators follow the same comma-wsp rule as number lists.

use crate::error::ParseError;
use crate::{is_wsp, skip_comma_wsp, skip_wsp};

/// Receiver for string-list parse events.
pub trait StringListHandler {
    fn start_string_list(&mut self) {}
    fn string_value(&mut self, value: &str);
    fn end_string_list(&mut self) {}
}

impl StringListHandler for Vec<String> {
    fn string_value(&mut self, value: &str) {
        self.push(value.to_owned());
    }
}

/// String-list parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringListParser;

impl StringListParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse `text`, reporting tokens to `handler`.
    pub fn parse<H>(&self, text: &str, handler: &mut H) -> Result<(), ParseError>
    where
        H: StringListHandler + ?Sized,
    {
        let bytes = text.as_bytes();
        handler.start_string_list();
        let mut pos = skip_wsp(bytes, 0);
        while pos < bytes.len() {
            let end = token_end(bytes, pos);
            if end == pos {
                return Err(ParseError::at(text, pos));
            }
            handler.string_value(&text[pos..end]);
            pos = skip_comma_wsp(bytes, end);
        }
        handler.end_string_list();
        Ok(())
    }
}

/// Parse a string list into a vector of owned tokens.
pub fn parse_string_list(text: &str) -> Result<Vec<String>, ParseError> {
    let mut out = Vec::new();
    StringListParser::new().parse(text, &mut out)?;
    Ok(out)
}

fn token_end(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(&b) = bytes.get(pos) {
        if is_wsp(b) || b == b',' {
            break;
        }
        pos += 1;
    }
    pos
}
