use std::collections::HashSet;

use crate::scorers::lists::{contains_any, ScoringLists};

const DOMAIN_SUFFIXES: [&str; 3] = [".com", ".org", ".net"];
const SHORT_NAME_MAX: usize = 3;
const GENERIC_NAME_MAX: usize = 10;

/// Which merchant-name heuristics fire for a given name.
///
/// The rule scorer and the feature synthesizer weight these differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MerchantSignals {
    pub whitelisted: bool,
    pub suspicious_keyword: bool,
    pub very_short: bool,
    pub business_pattern_count: usize,
    pub single_case_without_domain: bool,
    pub repeated_characters: bool,
    pub contains_digit: bool,
    pub short_generic_name: bool,
}

impl MerchantSignals {
    pub fn inspect(merchant: &str, lists: &ScoringLists) -> Self {
        let lower = merchant.trim().to_lowercase();
        if lists.is_legitimate_merchant(&lower) {
            return Self {
                whitelisted: true,
                ..Default::default()
            };
        }

        let length = lower.chars().count();
        let distinct = lower.chars().collect::<HashSet<_>>().len();
        let has_domain = DOMAIN_SUFFIXES.iter().any(|suffix| lower.contains(suffix));

        Self {
            whitelisted: false,
            suspicious_keyword: contains_any(&lower, &lists.suspicious_keywords),
            very_short: length <= SHORT_NAME_MAX,
            business_pattern_count: lists
                .business_patterns
                .iter()
                .filter(|pattern| lower.contains(pattern.as_str()))
                .count(),
            single_case_without_domain: is_single_case(merchant) && !has_domain,
            repeated_characters: distinct <= 2 && length > SHORT_NAME_MAX,
            contains_digit: merchant.chars().any(|c| c.is_ascii_digit()),
            short_generic_name: contains_any(&lower, &lists.generic_names)
                && length <= GENERIC_NAME_MAX,
        }
    }
}

/// True when the name has cased letters and they are all lower or all upper.
fn is_single_case(name: &str) -> bool {
    let cased: Vec<char> = name
        .chars()
        .filter(|c| c.is_lowercase() || c.is_uppercase())
        .collect();
    !cased.is_empty()
        && (cased.iter().all(|c| c.is_lowercase()) || cased.iter().all(|c| c.is_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelisted_merchant_short_circuits() {
        let signals = MerchantSignals::inspect("  Netflix.com ", &ScoringLists::default());
        assert_eq!(
            signals,
            MerchantSignals {
                whitelisted: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_single_case() {
        assert!(is_single_case("acme"));
        assert!(is_single_case("ACME 24"));
        assert!(!is_single_case("Acme"));
        assert!(!is_single_case("1234"));
    }

    #[test]
    fn test_signals_for_made_up_name() {
        let signals = MerchantSignals::inspect("tech solutions llc", &ScoringLists::default());
        assert!(!signals.whitelisted);
        assert!(signals.business_pattern_count >= 2);
        assert!(signals.single_case_without_domain);
        assert!(!signals.contains_digit);
    }
}
