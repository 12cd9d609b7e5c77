use std::sync::OnceLock;

use regex::Regex;

/// Sortable key derived from a card id of the form `<setCode>-<suffix>`,
/// e.g. `base1-100` or `bw11-RC12`. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingKey {
    pub has_alpha_prefix: bool,
    pub prefix: String,
    /// Parsed numeric part of the suffix; `f64::NEG_INFINITY` when the
    /// suffix carries no digits, so digit-less ids sort ahead of numbered
    /// ones and fall back to lexical comparison among themselves.
    pub numeric_value: f64,
    pub raw_suffix: String,
}

fn strict_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]*)([0-9]+)$").expect("valid suffix regex"))
}

fn permissive_suffix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^0-9]*)([0-9]+)$").expect("valid suffix regex"))
}

/// Parse a card id into its ordering key.
///
/// Parsing is total: any input yields a key. Ids without a `-` or without a
/// numeric suffix degrade to the no-numeric-part sentinel instead of
/// erroring.
pub fn parse_card_id(id: &str) -> OrderingKey {
    let suffix = id
        .split_once('-')
        .map(|(_, rest)| rest)
        .unwrap_or("")
        .trim();

    let captures = strict_suffix_regex()
        .captures(suffix)
        .or_else(|| permissive_suffix_regex().captures(suffix));

    match captures {
        Some(caps) => {
            let letters = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let digits = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            OrderingKey {
                has_alpha_prefix: !letters.is_empty(),
                prefix: letters.to_uppercase(),
                numeric_value: digits.parse().unwrap_or(f64::NEG_INFINITY),
                raw_suffix: suffix.to_string(),
            }
        }
        None => OrderingKey {
            has_alpha_prefix: false,
            prefix: String::new(),
            numeric_value: f64::NEG_INFINITY,
            raw_suffix: suffix.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plain_numeric_suffix() {
        let key = parse_card_id("base1-100");
        assert!(!key.has_alpha_prefix);
        assert_eq!(key.prefix, "");
        assert_eq!(key.numeric_value, 100.0);
        assert_eq!(key.raw_suffix, "100");
    }

    #[test]
    fn lettered_suffix_uppercases_prefix() {
        let key = parse_card_id("bw11-rc12");
        assert!(key.has_alpha_prefix);
        assert_eq!(key.prefix, "RC");
        assert_eq!(key.numeric_value, 12.0);
    }

    #[test]
    fn permissive_fallback_handles_non_letter_prefixes() {
        // Strict pattern rejects the dot, the permissive one captures it.
        let key = parse_card_id("promo-SM.210");
        assert!(key.has_alpha_prefix);
        assert_eq!(key.prefix, "SM.");
        assert_eq!(key.numeric_value, 210.0);
    }

    #[test]
    fn suffix_is_everything_after_the_first_dash() {
        let key = parse_card_id("xy-trainer-30");
        assert_eq!(key.raw_suffix, "trainer-30");
        assert!(key.has_alpha_prefix);
        assert_eq!(key.prefix, "TRAINER-");
        assert_eq!(key.numeric_value, 30.0);
    }

    #[rstest]
    #[case("base1")]
    #[case("base1-")]
    #[case("base1-promo")]
    #[case("")]
    fn ids_without_digits_get_the_sentinel(#[case] id: &str) {
        let key = parse_card_id(id);
        assert!(!key.has_alpha_prefix);
        assert_eq!(key.prefix, "");
        assert_eq!(key.numeric_value, f64::NEG_INFINITY);
    }

    #[test]
    fn leading_zeroes_compare_numerically() {
        assert_eq!(parse_card_id("sv1-007").numeric_value, 7.0);
    }
}
