use serde::{Deserialize, Serialize};

use crate::{
    error::ScoringError,
    model::LATENT_FEATURE_COUNT,
};

/// Human-readable attributes of a payment transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAttributes {
    pub amount: f64,
    pub merchant: String,
    pub location: String,
    pub card_number: String,
    /// ISO-8601 instant.
    pub timestamp: String,
}

impl TransactionAttributes {
    pub fn new(
        amount: f64,
        merchant: impl Into<String>,
        location: impl Into<String>,
        card_number: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            merchant: merchant.into(),
            location: location.into(),
            card_number: card_number.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Caller-supplied latent features, bypassing synthesis and rule scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitFeatures {
    pub time: f64,
    pub features: [f64; LATENT_FEATURE_COUNT],
    pub amount: f64,
}

impl ExplicitFeatures {
    /// Fails unless `features` holds exactly 28 values; no padding is done here.
    pub fn new(time: f64, features: &[f64], amount: f64) -> Result<Self, ScoringError> {
        let features: [f64; LATENT_FEATURE_COUNT] =
            features
                .try_into()
                .map_err(|_| ScoringError::FeatureVectorLength {
                    expected: LATENT_FEATURE_COUNT,
                    actual: features.len(),
                })?;

        Ok(Self {
            time,
            features,
            amount,
        })
    }
}

/// What the engine receives: either a ready feature vector or raw attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionInput {
    ExplicitFeatures(ExplicitFeatures),
    DerivedFeatures(TransactionAttributes),
}

impl From<ExplicitFeatures> for TransactionInput {
    fn from(features: ExplicitFeatures) -> Self {
        TransactionInput::ExplicitFeatures(features)
    }
}

impl From<TransactionAttributes> for TransactionInput {
    fn from(attributes: TransactionAttributes) -> Self {
        TransactionInput::DerivedFeatures(attributes)
    }
}
