#![forbid(unsafe_code)]

//! Attribute-backed structured lists.
//!
//! # Role in vgdom
//! A list-valued attribute such as `tableValues="0 0.5 1"` is exposed both as
//! text on its [`Element`] and as a typed [`List`] of [`Item`]s. This crate
//! keeps the two coherent:
//!
//! - external text changes mark the list stale, and the next read reparses;
//! - list mutations re-serialize and write the text back without reparsing;
//! - every item belongs to at most one list and reports in-place edits to it.
//!
//! # Example
//!
//! ```
//! use vgdom_list::{Element, NumberItem};
//!
//! let element = Element::new("feFuncR");
//! element.set_attribute("tableValues", "1 2 3");
//! let list = element.number_list("tableValues")?;
//!
//! list.remove_item(0)?;
//! list.append_item(NumberItem::new(4.0))?;
//! assert_eq!(element.get_attribute("tableValues").as_deref(), Some("2 3 4"));
//! # Ok::<(), vgdom_list::ListError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: serialize [`ListError`] for diagnostics output.
//! - `tracing-json`: [`logging::init_json_logging`] installs a JSON subscriber.

pub mod dynamic;
pub mod error;
pub mod item;
pub mod kind;
pub mod list;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod node;
pub mod number_list;
pub mod string_list;

pub use dynamic::{AnyItem, DynList};
pub use error::{ListError, ListErrorKind};
pub use item::Item;
pub use kind::{ListHandler, ListKind};
pub use list::{List, ListOptions};
pub use node::{AttributeHost, Element};
pub use number_list::{NumberItem, NumberKind, NumberList};
pub use string_list::{COMMA_SEPARATOR, StringItem, StringKind, StringList};
