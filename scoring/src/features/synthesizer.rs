use common::config::PerturbationMode;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use strum_macros::Display;

use crate::{
    features::random::{RandomSource, RngSource, ZeroPerturbation},
    model::{TransactionAttributes, LATENT_FEATURE_COUNT},
    scorers::{
        card_pattern::CARD_NUMBER_LEN,
        lists::{normalize_card_number, ScoringLists, DEFAULT_LISTS},
        merchant::MerchantSignals,
    },
};

/// Number of digest bytes that make up the base pattern.
const PATTERN_BYTES: usize = 16;
const BASE_SPREAD: f64 = 10.0;

const FEATURE_CEILING: f64 = 10.0;
const FEATURE_FLOOR: f64 = -10.0;

const LOCAL_AMOUNT_LIMIT: f64 = 500.0;

/// Coarse band of the synthesizer's own risk estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RiskBand {
    /// 5 and above.
    #[strum(to_string = "high")]
    High,
    /// 3 or 4.
    #[strum(to_string = "medium")]
    Medium,
    /// 1 or 2.
    #[strum(to_string = "low")]
    Low,
    #[strum(to_string = "minimal")]
    Minimal,
}

impl RiskBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            5.. => RiskBand::High,
            3..=4 => RiskBand::Medium,
            1..=2 => RiskBand::Low,
            0 => RiskBand::Minimal,
        }
    }
}

/// 28 latent-like values derived from transaction attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFeatures {
    pub values: [f64; LATENT_FEATURE_COUNT],
    /// The reproducible, pre-perturbation pattern.
    pub base: [f64; LATENT_FEATURE_COUNT],
    pub risk_score: u32,
    pub band: RiskBand,
}

/// Builds pseudo-features for transactions that arrive without a feature vector.
///
/// The base pattern is a pure function of the attributes. The perturbation
/// on top of it is drawn from a random source picked by [`PerturbationMode`].
///
/// The risk estimate used to pick the perturbation band is its own algorithm
/// with its own weights; it is intentionally not the rule scorer's score.
#[derive(Debug, Clone)]
pub struct FeatureSynthesizer {
    lists: Arc<ScoringLists>,
    mode: PerturbationMode,
}

impl Default for FeatureSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_LISTS.clone(), PerturbationMode::default())
    }
}

impl FeatureSynthesizer {
    pub fn new(lists: Arc<ScoringLists>, mode: PerturbationMode) -> Self {
        Self { lists, mode }
    }

    pub fn mode(&self) -> PerturbationMode {
        self.mode
    }

    /// Synthesizes features, drawing randomness according to the configured mode.
    pub fn synthesize(&self, transaction: &TransactionAttributes) -> SyntheticFeatures {
        let digest = transaction_digest(transaction);
        match self.mode {
            PerturbationMode::Random => {
                self.synthesize_from_digest(transaction, &digest, &mut RngSource::thread())
            }
            PerturbationMode::HashSeeded => self.synthesize_from_digest(
                transaction,
                &digest,
                &mut RngSource::from_digest(digest),
            ),
            PerturbationMode::Seeded(seed) => {
                self.synthesize_from_digest(transaction, &digest, &mut RngSource::seeded(seed))
            }
            PerturbationMode::Disabled => {
                self.synthesize_from_digest(transaction, &digest, &mut ZeroPerturbation)
            }
        }
    }

    /// Synthesizes features with a caller-provided random source.
    pub fn synthesize_with(
        &self,
        transaction: &TransactionAttributes,
        random: &mut dyn RandomSource,
    ) -> SyntheticFeatures {
        let digest = transaction_digest(transaction);
        self.synthesize_from_digest(transaction, &digest, random)
    }

    fn synthesize_from_digest(
        &self,
        transaction: &TransactionAttributes,
        digest: &[u8; 32],
        random: &mut dyn RandomSource,
    ) -> SyntheticFeatures {
        let base = base_pattern(digest);
        let risk_score = self.auxiliary_risk_score(transaction);
        let band = RiskBand::from_score(risk_score);

        let mut values = base;
        match band {
            RiskBand::High => raise(&mut values, LATENT_FEATURE_COUNT, (2.0, 4.0), random),
            RiskBand::Medium => raise(&mut values, 14, (1.0, 2.0), random),
            RiskBand::Low => raise(&mut values, 7, (0.5, 1.0), random),
            RiskBand::Minimal => {
                if transaction.amount < LOCAL_AMOUNT_LIMIT
                    && self.lists.mentions_local(&transaction.location)
                {
                    lower(&mut values, 5, (0.5, 1.0), random);
                }
            }
        }

        tracing::debug!(risk_score, band = %band, "synthesized latent features");

        SyntheticFeatures {
            values,
            base,
            risk_score,
            band,
        }
    }

    /// The synthesizer's coarse risk estimate that selects the perturbation band.
    pub fn auxiliary_risk_score(&self, transaction: &TransactionAttributes) -> u32 {
        let mut score = 0;

        score += match transaction.amount {
            a if a > 10_000.0 => 3,
            a if a > 5_000.0 => 2,
            a if a > 1_000.0 => 1,
            _ => 0,
        };

        let merchant = MerchantSignals::inspect(&transaction.merchant, &self.lists);
        if !merchant.whitelisted {
            if merchant.suspicious_keyword {
                score += 3;
            }
            if merchant.very_short {
                score += 2;
            }
            score += match merchant.business_pattern_count {
                0 => 0,
                1 => 2,
                _ => 3,
            };
            if merchant.single_case_without_domain {
                score += 1;
            }
            if merchant.repeated_characters {
                score += 3;
            }
            if merchant.contains_digit {
                score += 2;
            }
            if merchant.short_generic_name {
                score += 2;
            }
        }

        if self.lists.mentions_foreign(&transaction.location) {
            score += 2;
        }

        let card = normalize_card_number(&transaction.card_number);
        if !transaction.card_number.is_empty() && card.chars().count() != CARD_NUMBER_LEN {
            score += 2;
        }

        score
    }
}

/// SHA-256 over the canonical attribute strings, concatenated in field order.
pub fn transaction_digest(transaction: &TransactionAttributes) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{:?}", transaction.amount).as_bytes());
    hasher.update(transaction.merchant.as_bytes());
    hasher.update(transaction.location.as_bytes());
    hasher.update(transaction.card_number.as_bytes());
    hasher.update(transaction.timestamp.as_bytes());
    hasher.finalize().into()
}

/// Maps the first 16 digest bytes, cycled over 28 slots, into roughly [-5, 5].
pub fn base_pattern(digest: &[u8; 32]) -> [f64; LATENT_FEATURE_COUNT] {
    let mut pattern = [0.0; LATENT_FEATURE_COUNT];
    for (i, slot) in pattern.iter_mut().enumerate() {
        let byte = digest[i % PATTERN_BYTES];
        *slot = (f64::from(byte) / 255.0 - 0.5) * BASE_SPREAD;
    }
    pattern
}

fn raise(
    values: &mut [f64; LATENT_FEATURE_COUNT],
    count: usize,
    (low, high): (f64, f64),
    random: &mut dyn RandomSource,
) {
    for value in values.iter_mut().take(count) {
        *value = (*value + random.uniform(low, high)).min(FEATURE_CEILING);
    }
}

fn lower(
    values: &mut [f64; LATENT_FEATURE_COUNT],
    count: usize,
    (low, high): (f64, f64),
    random: &mut dyn RandomSource,
) {
    for value in values.iter_mut().take(count) {
        *value = (*value - random.uniform(low, high)).max(FEATURE_FLOOR);
    }
}
