use serde::{Serialize, Serializer};
use strum_macros::Display;

use crate::error::ScoringError;

/// Which part of the transaction a factor was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    Amount,
    Merchant,
    Location,
    Card,
    Time,
    Classifier,
}

/// A human-readable reason that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RiskFactor {
    #[strum(to_string = "very high amount")]
    VeryHighAmount,
    #[strum(to_string = "high amount")]
    HighAmount,
    #[strum(to_string = "moderate amount")]
    ModerateAmount,

    #[strum(to_string = "suspicious merchant name")]
    SuspiciousMerchantName,
    #[strum(to_string = "very short merchant name")]
    ShortMerchantName,
    #[strum(to_string = "multiple suspicious merchant patterns")]
    MultipleMerchantPatterns,
    #[strum(to_string = "suspicious merchant pattern")]
    MerchantPattern,
    #[strum(to_string = "unusual merchant name format")]
    UnusualMerchantFormat,
    #[strum(to_string = "repeated character pattern in merchant name")]
    RepeatedMerchantCharacters,
    #[strum(to_string = "numbers in merchant name")]
    DigitsInMerchantName,
    #[strum(to_string = "generic merchant name")]
    GenericMerchantName,

    #[strum(to_string = "international transaction")]
    InternationalTransaction,

    #[strum(to_string = "invalid length")]
    InvalidCardLength,
    #[strum(to_string = "non-digit characters")]
    NonDigitCard,
    #[strum(to_string = "all digits identical")]
    AllDigitsIdentical,
    #[strum(to_string = "very few unique digits")]
    FewUniqueDigits,
    #[strum(to_string = "common test card number")]
    CommonTestCard,
    #[strum(to_string = "repeated pattern detected")]
    RepeatedCardPattern,
    #[strum(to_string = "suspicious starting digits")]
    SuspiciousStartingDigits,
    #[strum(to_string = "all zeros")]
    AllZeros,
    #[strum(to_string = "all ones")]
    AllOnes,
    #[strum(to_string = "alternating pattern detected")]
    AlternatingPattern,
    #[strum(to_string = "known test card number")]
    KnownTestCard,
    #[strum(to_string = "fails Luhn check")]
    FailsLuhn,

    #[strum(to_string = "unusual transaction time")]
    UnusualTime,

    #[strum(to_string = "high fraud probability")]
    HighFraudProbability,
    #[strum(to_string = "legitimate transaction pattern")]
    LegitimatePattern,
}

impl RiskFactor {
    pub fn category(&self) -> FactorCategory {
        use RiskFactor::*;
        match self {
            VeryHighAmount | HighAmount | ModerateAmount => FactorCategory::Amount,
            SuspiciousMerchantName
            | ShortMerchantName
            | MultipleMerchantPatterns
            | MerchantPattern
            | UnusualMerchantFormat
            | RepeatedMerchantCharacters
            | DigitsInMerchantName
            | GenericMerchantName => FactorCategory::Merchant,
            InternationalTransaction => FactorCategory::Location,
            InvalidCardLength | NonDigitCard | AllDigitsIdentical | FewUniqueDigits
            | CommonTestCard | RepeatedCardPattern | SuspiciousStartingDigits | AllZeros
            | AllOnes | AlternatingPattern | KnownTestCard | FailsLuhn => FactorCategory::Card,
            UnusualTime => FactorCategory::Time,
            HighFraudProbability | LegitimatePattern => FactorCategory::Classifier,
        }
    }
}

impl Serialize for RiskFactor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Outcome of the card-number pattern checks.
///
/// `valid` only says the number is 16 digits; fraud likelihood lives in `risk`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardValidationResult {
    pub valid: bool,
    pub risk: u32,
    pub reasons: Vec<RiskFactor>,
}

/// Rule scorer output. Factors are kept in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RiskAssessment {
    pub score: u32,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    pub(crate) fn add(&mut self, score: u32, factor: RiskFactor) {
        self.score += score;
        self.factors.push(factor);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PredictedClass {
    #[strum(to_string = "legitimate")]
    Legitimate,
    #[strum(to_string = "fraud")]
    Fraud,
}

const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// What a classifier returns for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierVerdict {
    pub class: PredictedClass,
    pub p_legitimate: f64,
    pub p_fraud: f64,
}

impl ClassifierVerdict {
    /// Builds a verdict from the fraud-class probability.
    pub fn from_fraud_probability(class: PredictedClass, p_fraud: f64) -> Self {
        Self {
            class,
            p_legitimate: 1.0 - p_fraud,
            p_fraud,
        }
    }

    /// Rejects probability pairs that are out of range or do not sum to one.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_range(self.p_legitimate) || !in_range(self.p_fraud) {
            return Err(ScoringError::classifier(format!(
                "probabilities out of range: ({}, {})",
                self.p_legitimate, self.p_fraud
            )));
        }
        if (self.p_legitimate + self.p_fraud - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ScoringError::classifier(format!(
                "probabilities do not sum to 1: ({}, {})",
                self.p_legitimate, self.p_fraud
            )));
        }
        Ok(())
    }
}

/// Direct classifier result for caller-supplied features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub class: PredictedClass,
    pub fraud_probability: f64,
    pub legitimate_probability: f64,
    /// Probability of the more likely class.
    pub confidence: f64,
}

impl From<ClassifierVerdict> for Prediction {
    fn from(verdict: ClassifierVerdict) -> Self {
        Self {
            class: verdict.class,
            fraud_probability: verdict.p_fraud,
            legitimate_probability: verdict.p_legitimate,
            confidence: verdict.p_fraud.max(verdict.p_legitimate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPath {
    #[strum(to_string = "explicit")]
    Explicit,
    #[strum(to_string = "derived")]
    Derived,
}

/// Final engine output for one transaction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedVerdict {
    is_fraud: bool,
    combined_score: f64,
    rule_score: u32,
    ml_probability: f64,
    confidence: Confidence,
    classifier_class: PredictedClass,
    path: ScoringPath,
    factors: Vec<RiskFactor>,
}

impl CombinedVerdict {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        is_fraud: bool,
        combined_score: f64,
        rule_score: u32,
        ml_probability: f64,
        confidence: Confidence,
        classifier_class: PredictedClass,
        path: ScoringPath,
        factors: Vec<RiskFactor>,
    ) -> Self {
        Self {
            is_fraud,
            combined_score,
            rule_score,
            ml_probability,
            confidence,
            classifier_class,
            path,
            factors,
        }
    }

    pub fn is_fraud(&self) -> bool {
        self.is_fraud
    }

    pub fn combined_score(&self) -> f64 {
        self.combined_score
    }

    pub fn rule_score(&self) -> u32 {
        self.rule_score
    }

    /// Fraud-class probability reported by the classifier.
    pub fn ml_probability(&self) -> f64 {
        self.ml_probability
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// The classifier's own label; may disagree with `is_fraud` on the derived path.
    pub fn classifier_class(&self) -> PredictedClass {
        self.classifier_class
    }

    pub fn path(&self) -> ScoringPath {
        self.path
    }

    pub fn factors(&self) -> &[RiskFactor] {
        &self.factors
    }
}
