#![forbid(unsafe_code)]

//! Localized diagnostics for vgdom.
//!
//! Errors raised by the list engine carry a message *key* and named
//! arguments instead of a baked-in sentence. This crate turns those into
//! text:
//!
//! - [`MessageCatalog`]: key lookup with a locale fallback chain and `{name}`
//!   interpolation.
//! - [`bundled`]: the built-in English and French messages for every key the
//!   workspace emits.
//! - [`locale`]: which locale to render in, resolved from the environment.

pub mod bundled;
pub mod catalog;
pub mod locale;

pub use bundled::{BUNDLED_KEYS, bundled_catalog};
pub use catalog::{LocaleMessages, MessageCatalog};
pub use locale::{default_locale, locale_from_env, normalize_locale};
