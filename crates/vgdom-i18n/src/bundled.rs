//! Built-in messages for every diagnostic key emitted by the workspace.

use std::sync::OnceLock;

use crate::catalog::{LocaleMessages, MessageCatalog};

/// Every key `vgdom-list` can put on an error.
pub const BUNDLED_KEYS: &[&str] = &[
    "list.wrong-type",
    "list.index-out-of-bounds",
    "list.parse-error.unexpected-char",
    "list.parse-error.unexpected-end",
    "list.parse-error.number-out-of-range",
    "list.invalid-value",
    "list.read-only",
];

const EN: &[(&str, &str)] = &[
    ("list.wrong-type", "expected a {expected} item, found a {found} item"),
    (
        "list.index-out-of-bounds",
        "index {index} is out of bounds for a list of length {len}",
    ),
    (
        "list.parse-error.unexpected-char",
        "attribute '{attribute}' could not be parsed: unexpected character {char} at byte {position}",
    ),
    (
        "list.parse-error.unexpected-end",
        "attribute '{attribute}' could not be parsed: unexpected end of input at byte {position}",
    ),
    (
        "list.parse-error.number-out-of-range",
        "attribute '{attribute}' could not be parsed: number out of range at byte {position}",
    ),
    ("list.invalid-value", "{value} is not a valid {expected} value"),
    ("list.read-only", "attribute '{attribute}' is read-only"),
];

const FR: &[(&str, &str)] = &[
    (
        "list.wrong-type",
        "élément {expected} attendu, élément {found} reçu",
    ),
    (
        "list.index-out-of-bounds",
        "l'indice {index} dépasse une liste de longueur {len}",
    ),
    (
        "list.parse-error.unexpected-char",
        "l'attribut « {attribute} » est invalide : caractère {char} inattendu à l'octet {position}",
    ),
    (
        "list.parse-error.unexpected-end",
        "l'attribut « {attribute} » est invalide : fin de texte inattendue à l'octet {position}",
    ),
    (
        "list.parse-error.number-out-of-range",
        "l'attribut « {attribute} » est invalide : nombre hors limites à l'octet {position}",
    ),
    ("list.invalid-value", "{value} n'est pas une valeur {expected} valide"),
    ("list.read-only", "l'attribut « {attribute} » est en lecture seule"),
];

/// The shared built-in catalog (`en`, `fr`; falls back to `en`).
pub fn bundled_catalog() -> &'static MessageCatalog {
    static CATALOG: OnceLock<MessageCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut catalog = MessageCatalog::new();
        catalog.add_locale("en", EN.iter().copied().collect::<LocaleMessages>());
        catalog.add_locale("fr", FR.iter().copied().collect::<LocaleMessages>());
        catalog.set_fallback_chain(vec!["en".into()]);
        catalog
    })
}
