//! Property-based invariant tests for the list tokenizers.
//!
//! Verifies:
//! 1. Any finite f32 sequence formatted with `{}` and joined by comma-wsp
//!    separators parses back to the same values
//! 2. The parser never panics on arbitrary input, and errors point inside
//!    (or exactly at the end of) the input
//! 3. String tokens without separators survive a join/parse cycle

use proptest::prelude::*;
use vgdom_parser::{parse_number_list, parse_string_list};

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just(","), Just(", "), Just(" ,\t"), Just("\n")]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Number round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn numbers_round_trip(
        values in proptest::collection::vec(proptest::num::f32::NORMAL | proptest::num::f32::ZERO, 0..40),
        sep in separator(),
    ) {
        let text = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(sep);
        let parsed = parse_number_list(&text);
        prop_assert!(parsed.is_ok(), "failed on {:?}: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), values);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Arbitrary input is handled without panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_input_never_panics(text in "\\PC{0,40}") {
        if let Err(err) = parse_number_list(&text) {
            prop_assert!(err.position <= text.len());
        }
        if let Err(err) = parse_string_list(&text) {
            prop_assert!(err.position <= text.len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. String round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn strings_round_trip(
        tokens in proptest::collection::vec("[a-zA-Z0-9#:/.-]{1,12}", 0..20),
        sep in separator(),
    ) {
        let text = tokens.join(sep);
        prop_assert_eq!(parse_string_list(&text).unwrap(), tokens);
    }
}
