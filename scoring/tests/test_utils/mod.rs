#![allow(dead_code)]

pub mod mocks;

use common::config::PerturbationMode;
use scoring::{
    classifier::{ClassifierAdapter, StandardScaler},
    combiner::ScoreCombiner,
    error::ScoringError,
    model::{ClassifierVerdict, PredictedClass, ScaledFeatures, TransactionAttributes},
    scorers::{lists::DEFAULT_LISTS, RuleScorer},
};

/// Noon UTC, outside the unusual-hours window.
pub const NOON: &str = "2024-01-15T12:00:00Z";
pub const NOON_EPOCH: f64 = 1_705_320_000.0;

/// Luhn-valid number that trips none of the pattern checks.
pub const CLEAN_CARD: &str = "4532015112830366";

pub fn attributes(
    amount: f64,
    merchant: &str,
    location: &str,
    card_number: &str,
    timestamp: &str,
) -> TransactionAttributes {
    TransactionAttributes::new(amount, merchant, location, card_number, timestamp)
}

pub fn everyday_purchase() -> TransactionAttributes {
    attributes(9.99, "netflix.com", "new york", CLEAN_CARD, NOON)
}

pub fn obvious_fraud() -> TransactionAttributes {
    attributes(50_000.0, "xx", "international", "0000000000000000", NOON)
}

/// Classifier that always answers the same thing.
#[derive(Debug, Clone, Copy)]
pub struct StaticClassifier {
    pub class: PredictedClass,
    pub p_fraud: f64,
}

impl StaticClassifier {
    pub fn new(class: PredictedClass, p_fraud: f64) -> Self {
        Self { class, p_fraud }
    }

    pub fn legitimate(p_fraud: f64) -> Self {
        Self::new(PredictedClass::Legitimate, p_fraud)
    }

    pub fn fraud(p_fraud: f64) -> Self {
        Self::new(PredictedClass::Fraud, p_fraud)
    }
}

impl ClassifierAdapter for StaticClassifier {
    fn classify(&self, _features: &ScaledFeatures) -> Result<ClassifierVerdict, ScoringError> {
        Ok(ClassifierVerdict::from_fraud_probability(self.class, self.p_fraud))
    }
}

/// Engine with default lists, no perturbation and an identity scaler.
pub fn engine_with<C: ClassifierAdapter>(classifier: C) -> ScoreCombiner<RuleScorer, C> {
    ScoreCombiner::with_lists(
        DEFAULT_LISTS.clone(),
        PerturbationMode::Disabled,
        StandardScaler::identity(),
        classifier,
    )
}
