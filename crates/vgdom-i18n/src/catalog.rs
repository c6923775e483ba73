//! Message catalog with locale fallback and interpolation.
//!
//! # Invariants
//!
//! 1. **Fallback terminates**: a lookup tries the requested locale, then its
//!    base language (`"fr-CA"` -> `"fr"`), then each entry of the fallback
//!    chain exactly once, returning `None` if nothing provides the key.
//!
//! 2. **Single-pass interpolation**: `format()` replaces `{name}` tokens in
//!    one pass; substituted values are never re-scanned.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | Returns `None` |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Bad interpolation arg | `{name}` but no `name` arg | Token left as-is |

use rustc_hash::FxHashMap;

/// Messages for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleMessages {
    messages: FxHashMap<String, String>,
}

impl LocaleMessages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(key.into(), template.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleMessages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (key, template) in iter {
            out.insert(key, template);
        }
        out
    }
}

/// Central message catalog.
///
/// # Example
///
/// ```
/// use vgdom_i18n::catalog::{LocaleMessages, MessageCatalog};
///
/// let mut catalog = MessageCatalog::new();
/// let mut en = LocaleMessages::new();
/// en.insert("list.index", "index {index} is out of bounds");
/// catalog.add_locale("en", en);
/// catalog.set_fallback_chain(vec!["en".into()]);
///
/// assert_eq!(
///     catalog.format("de", "list.index", &[("index", "7")]),
///     Some("index 7 is out of bounds".into())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    locales: FxHashMap<String, LocaleMessages>,
    fallback_chain: Vec<String>,
}

impl MessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the messages for a locale.
    pub fn add_locale(&mut self, locale: impl Into<String>, messages: LocaleMessages) {
        self.locales.insert(locale.into(), messages);
    }

    /// Set the fallback chain (tried in order when a key is missing).
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    /// Look up a message template.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        let base = locale.split_once('-').map(|(base, _)| base);
        let direct = std::iter::once(locale).chain(base);
        let chain = self
            .fallback_chain
            .iter()
            .map(String::as_str)
            .filter(|tag| *tag != locale && Some(*tag) != base);

        direct
            .chain(chain)
            .find_map(|tag| self.locales.get(tag).and_then(|m| m.get(key)))
    }

    /// Look up a template and substitute `{name}` tokens from `args`.
    #[must_use]
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key)
            .map(|template| interpolate(template, args))
    }

    /// Keys from `reference_keys` that `locale` cannot resolve, sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .map(|key| (*key).to_owned())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// All registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

/// Single-pass `{name}` interpolation. Unmatched tokens left as-is.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let token = &after[..close];
                match args.iter().find(|(name, _)| *name == token) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push('{');
                        result.push_str(token);
                        result.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
