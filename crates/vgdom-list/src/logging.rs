//! JSON log output for embedders that have no subscriber of their own.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "VGDOM_LOG";

/// Directive used when neither `VGDOM_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Resolve the filter directive through `get_env`.
pub fn filter_directive_from_env(get_env: impl Fn(&str) -> Option<String>) -> String {
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .filter_map(|&key| get_env(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

/// Install a global JSON subscriber filtered by [`LOG_ENV`].
///
/// Returns `false` if a global subscriber was already set.
pub fn init_json_logging() -> bool {
    let directive = filter_directive_from_env(|key| std::env::var(key).ok());
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new(directive))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn own_variable_wins() {
        let get = env(&[("VGDOM_LOG", "vgdom_list=trace"), ("RUST_LOG", "info")]);
        assert_eq!(filter_directive_from_env(get), "vgdom_list=trace");
    }

    #[test]
    fn falls_back_to_rust_log_then_default() {
        assert_eq!(filter_directive_from_env(env(&[("RUST_LOG", "debug")])), "debug");
        assert_eq!(filter_directive_from_env(env(&[("VGDOM_LOG", " ")])), "warn");
        assert_eq!(filter_directive_from_env(env(&[])), "warn");
    }
}
