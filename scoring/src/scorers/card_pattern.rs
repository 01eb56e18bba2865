use std::{collections::HashSet, sync::Arc};

use crate::{
    model::{CardValidationResult, RiskFactor},
    scorers::lists::{normalize_card_number, ScoringLists, DEFAULT_LISTS},
};

pub const CARD_NUMBER_LEN: usize = 16;

const INVALID_LENGTH_RISK: u32 = 15;
const NON_DIGIT_RISK: u32 = 20;
const ALL_IDENTICAL_RISK: u32 = 60;
const FEW_UNIQUE_RISK: u32 = 40;
const COMMON_TEST_CARD_RISK: u32 = 60;
const REPEATED_PATTERN_RISK: u32 = 50;
const SUSPICIOUS_START_RISK: u32 = 35;
const ALL_ZEROS_OR_ONES_RISK: u32 = 60;
const ALTERNATING_RISK: u32 = 45;
const KNOWN_TEST_CARD_RISK: u32 = 55;
const LUHN_FAILURE_RISK: u32 = 30;

const MIN_BLOCK_LEN: usize = 4;
const MAX_BLOCK_LEN: usize = CARD_NUMBER_LEN / 2;

/// Looks for structural and statistical anomalies in card numbers.
#[derive(Debug, Clone)]
pub struct CardPatternValidator {
    lists: Arc<ScoringLists>,
}

impl Default for CardPatternValidator {
    fn default() -> Self {
        Self::new(DEFAULT_LISTS.clone())
    }
}

impl CardPatternValidator {
    pub fn new(lists: Arc<ScoringLists>) -> Self {
        Self { lists }
    }

    pub fn validate(&self, card_number: &str) -> CardValidationResult {
        // Nothing supplied: unknown rather than suspicious.
        if card_number.is_empty() {
            return CardValidationResult::default();
        }

        let clean = normalize_card_number(card_number);

        if clean.chars().count() != CARD_NUMBER_LEN {
            return CardValidationResult {
                valid: false,
                risk: INVALID_LENGTH_RISK,
                reasons: vec![RiskFactor::InvalidCardLength],
            };
        }

        if !clean.bytes().all(|b| b.is_ascii_digit()) {
            return CardValidationResult {
                valid: false,
                risk: NON_DIGIT_RISK,
                reasons: vec![RiskFactor::NonDigitCard],
            };
        }

        let mut result = CardValidationResult {
            valid: true,
            ..Default::default()
        };
        let mut flag = |risk: u32, reason: RiskFactor| {
            result.risk += risk;
            result.reasons.push(reason);
        };

        let digits = clean.as_bytes();
        let unique_digits = digits.iter().collect::<HashSet<_>>().len();
        if unique_digits == 1 {
            flag(ALL_IDENTICAL_RISK, RiskFactor::AllDigitsIdentical);
        } else if unique_digits <= 3 {
            flag(FEW_UNIQUE_RISK, RiskFactor::FewUniqueDigits);
        }

        if self.lists.denylisted_cards.contains(&clean) {
            flag(COMMON_TEST_CARD_RISK, RiskFactor::CommonTestCard);
        }

        if repeating_block_len(digits).is_some() {
            flag(REPEATED_PATTERN_RISK, RiskFactor::RepeatedCardPattern);
        }

        if self.lists.suspicious_starts.contains(&clean[..4]) {
            flag(SUSPICIOUS_START_RISK, RiskFactor::SuspiciousStartingDigits);
        }

        if digits.iter().all(|&d| d == b'0') {
            flag(ALL_ZEROS_OR_ONES_RISK, RiskFactor::AllZeros);
        } else if digits.iter().all(|&d| d == b'1') {
            flag(ALL_ZEROS_OR_ONES_RISK, RiskFactor::AllOnes);
        }

        if is_strictly_alternating(digits) {
            flag(ALTERNATING_RISK, RiskFactor::AlternatingPattern);
        }

        if self.lists.test_cards.contains(&clean) {
            flag(KNOWN_TEST_CARD_RISK, RiskFactor::KnownTestCard);
        }

        if !passes_luhn(digits) {
            flag(LUHN_FAILURE_RISK, RiskFactor::FailsLuhn);
        }

        result
    }
}

/// Smallest block length in 4..=8 whose repetition reproduces the whole number.
fn repeating_block_len(digits: &[u8]) -> Option<usize> {
    (MIN_BLOCK_LEN..=MAX_BLOCK_LEN).find(|&block_len| {
        digits.len() % block_len == 0
            && digits
                .chunks(block_len)
                .all(|chunk| chunk == &digits[..block_len])
    })
}

fn is_strictly_alternating(digits: &[u8]) -> bool {
    let even_same = digits.iter().step_by(2).all(|&d| d == digits[0]);
    let odd_same = digits.iter().skip(1).step_by(2).all(|&d| d == digits[1]);
    even_same && odd_same
}

/// Luhn checksum over ASCII digits.
pub fn passes_luhn(digits: &[u8]) -> bool {
    let checksum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                doubled / 10 + doubled % 10
            } else {
                digit
            }
        })
        .sum();
    checksum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn() {
        assert!(passes_luhn(b"4532015112830366"));
        assert!(passes_luhn(b"4111111111111111"));
        assert!(!passes_luhn(b"1234567890123456"));
        assert!(!passes_luhn(b"4532015112830367"));
    }

    #[test]
    fn test_repeating_block_only_tiles_whole_number() {
        assert_eq!(repeating_block_len(b"1234123412341234"), Some(4));
        assert_eq!(repeating_block_len(b"1234567812345678"), Some(8));
        assert_eq!(repeating_block_len(b"1234512345123451"), None);
        assert_eq!(repeating_block_len(b"4532015112830366"), None);
    }

    #[test]
    fn test_alternation() {
        assert!(is_strictly_alternating(b"0101010101010101"));
        assert!(is_strictly_alternating(b"7777777777777777"));
        assert!(!is_strictly_alternating(b"0101010101010100"));
    }
}
