//! Locale selection for rendered diagnostics.
//!
//! Resolution order: `VGDOM_LOCALE`, `LC_ALL`, `LC_MESSAGES`, `LANG`, then
//! `"en"`. POSIX values such as `fr_CA.UTF-8@euro` are normalized to BCP-47
//! style tags (`fr-CA`). The `C` and `POSIX` locales map to `"en"`.

use std::sync::OnceLock;

const FALLBACK_LOCALE: &str = "en";
const ENV_KEYS: [&str; 4] = ["VGDOM_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Normalize a POSIX or BCP-47 locale string.
///
/// Returns `None` for empty values and for `C`/`POSIX`, which carry no
/// language preference.
#[must_use]
pub fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
        return None;
    }
    let mut parts = tag.split('-');
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let mut out = language;
    for part in parts.filter(|p| !p.is_empty()) {
        out.push('-');
        if part.len() == 2 {
            out.push_str(&part.to_ascii_uppercase());
        } else {
            out.push_str(part);
        }
    }
    Some(out)
}

/// Resolve the diagnostic locale using a custom environment lookup.
#[must_use]
pub fn locale_from_env<F>(get_env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_KEYS
        .iter()
        .filter_map(|&key| get_env(key))
        .find_map(|value| normalize_locale(&value))
        .unwrap_or_else(|| FALLBACK_LOCALE.to_owned())
}

/// Cached diagnostic locale for this process.
pub fn default_locale() -> &'static str {
    static LOCALE: OnceLock<String> = OnceLock::new();
    LOCALE.get_or_init(|| {
        let locale = locale_from_env(|key| std::env::var(key).ok());
        tracing::debug!(%locale, "resolved diagnostic locale");
        locale
    })
}
