//! List errors.
//!
//! Every error carries a [`ListErrorKind`] (the DOM-style category the caller
//! branches on), a message key, and named arguments. The key and arguments
//! are rendered through a [`MessageCatalog`] so callers can report failures
//! in the user's locale; `Display` always renders English.
//!
//! # Failure Modes
//!
//! | Kind | Raised by | Model state afterwards |
//! |------|-----------|------------------------|
//! | `WrongType` | dynamic mutators | unchanged |
//! | `IndexSize` | `get_item`, `replace_item`, `remove_item` | unchanged (valid) |
//! | `Parse` | lazy reparse of the attribute text | stale |
//! | `InvalidValue` | value validation on insert or edit | unchanged |
//! | `NoModificationAllowed` | mutators on read-only lists | unchanged |

use std::fmt;

use smallvec::SmallVec;
use vgdom_i18n::{MessageCatalog, bundled_catalog, default_locale};
use vgdom_parser::{ParseError, ParseErrorKind};

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ListErrorKind {
    /// An item of the wrong kind was passed to a list.
    WrongType,
    /// An index outside `[0, len)`.
    IndexSize,
    /// Attribute text that does not parse. The list stays stale.
    Parse,
    /// A value the list cannot serialize.
    InvalidValue,
    /// A mutation of a read-only list or one of its items.
    NoModificationAllowed,
}

type Args = SmallVec<[(&'static str, String); 3]>;

/// A recoverable list failure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListError {
    kind: ListErrorKind,
    key: &'static str,
    args: Args,
    parse: Option<ParseError>,
}

impl ListError {
    /// An error with no arguments; see the named constructors below.
    #[must_use]
    pub fn new(kind: ListErrorKind, key: &'static str) -> Self {
        Self {
            kind,
            key,
            args: SmallVec::new(),
            parse: None,
        }
    }

    /// Attach a named message argument.
    #[must_use]
    pub fn with_arg(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.args.push((name, value.to_string()));
        self
    }

    /// An item of kind `found` was offered to a list of `expected` items.
    pub fn wrong_type(expected: &'static str, found: &'static str) -> Self {
        Self::new(ListErrorKind::WrongType, "list.wrong-type")
            .with_arg("expected", expected)
            .with_arg("found", found)
    }

    /// `index` is outside `[0, len)`.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::new(ListErrorKind::IndexSize, "list.index-out-of-bounds")
            .with_arg("index", index)
            .with_arg("len", len)
    }

    /// The text of `attribute` failed to tokenize.
    ///
    /// Each tokenizer error kind has its own key so that no English detail
    /// leaks into other locales.
    pub fn parse(attribute: &str, err: ParseError) -> Self {
        let key = match err.kind {
            ParseErrorKind::UnexpectedChar(_) => "list.parse-error.unexpected-char",
            ParseErrorKind::UnexpectedEnd => "list.parse-error.unexpected-end",
            ParseErrorKind::NumberOutOfRange => "list.parse-error.number-out-of-range",
        };
        let mut out = Self::new(ListErrorKind::Parse, key)
            .with_arg("attribute", attribute)
            .with_arg("position", err.position);
        if let ParseErrorKind::UnexpectedChar(ch) = err.kind {
            out = out.with_arg("char", format!("{ch:?}"));
        }
        out.parse = Some(err);
        out
    }

    /// `value` cannot be stored in a list of `expected` items.
    pub fn invalid_value(expected: &'static str, value: impl fmt::Debug) -> Self {
        Self::new(ListErrorKind::InvalidValue, "list.invalid-value")
            .with_arg("expected", expected)
            .with_arg("value", format!("{value:?}"))
    }

    /// The list bound to `attribute` rejects mutation.
    pub fn read_only(attribute: &str) -> Self {
        Self::new(ListErrorKind::NoModificationAllowed, "list.read-only")
            .with_arg("attribute", attribute)
    }

    /// Category to branch on.
    #[must_use]
    pub fn kind(&self) -> ListErrorKind {
        self.kind
    }

    /// Message key for catalog lookup.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Value of a named argument, if present.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(arg, _)| *arg == name)
            .map(|(_, value)| value.as_str())
    }

    /// The underlying tokenizer error for parse failures.
    #[must_use]
    pub fn parse_error(&self) -> Option<ParseError> {
        self.parse
    }

    /// Render with `catalog` in `locale`. Falls back to the key itself when
    /// the catalog has no template for it.
    #[must_use]
    pub fn localized(&self, catalog: &MessageCatalog, locale: &str) -> String {
        let args: SmallVec<[(&str, &str); 3]> = self
            .args
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        catalog
            .format(locale, self.key, &args)
            .unwrap_or_else(|| self.key.to_owned())
    }

    /// Render with the built-in catalog in the process locale.
    #[must_use]
    pub fn message(&self) -> String {
        self.localized(bundled_catalog(), default_locale())
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.localized(bundled_catalog(), "en"))
    }
}

impl std::error::Error for ListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.parse
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
