use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

use scoring::model::{
    ExplicitFeatures, LATENT_FEATURE_COUNT, TransactionAttributes, TransactionInput,
};

pub const UNKNOWN: &str = "Unknown";

/// Transaction as submitted by a caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub amount: Option<f64>,
    pub merchant: Option<String>,
    pub location: Option<String>,
    pub card_number: Option<String>,
    pub timestamp: Option<String>,
    /// Pre-computed latent features; used only when exactly 28 are given.
    #[serde(rename = "v_values")]
    pub v_values: Option<Vec<f64>>,
    /// Seconds offset for the explicit feature vector.
    pub time: Option<f64>,
}

/// A record with caller defaults applied, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTransaction {
    pub attributes: TransactionAttributes,
    pub input: TransactionInput,
}

impl TransactionRecord {
    /// Fills in defaults and picks the evaluation path.
    ///
    /// A missing timestamp becomes the current instant. A `v_values` list of
    /// the wrong length is dropped with a warning and the attributes are
    /// scored instead.
    pub fn prepare(self) -> PreparedTransaction {
        let attributes = TransactionAttributes::new(
            self.amount.unwrap_or(0.0),
            self.merchant.unwrap_or_else(|| UNKNOWN.to_string()),
            self.location.unwrap_or_else(|| UNKNOWN.to_string()),
            self.card_number.unwrap_or_default(),
            self.timestamp
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        );

        let explicit = self.v_values.and_then(|values| {
            match ExplicitFeatures::new(self.time.unwrap_or(0.0), &values, attributes.amount) {
                Ok(features) => Some(features),
                Err(e) => {
                    warn!(
                        "Ignoring v_values ({e}); expected {LATENT_FEATURE_COUNT}, scoring attributes instead"
                    );
                    None
                }
            }
        });

        let input = match explicit {
            Some(features) => TransactionInput::ExplicitFeatures(features),
            None => TransactionInput::DerivedFeatures(attributes.clone()),
        };

        PreparedTransaction { attributes, input }
    }
}

/// Reads a JSON array of records.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<TransactionRecord>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading transactions from {path:?}"))?;
    let records = serde_json::from_str(&contents)
        .with_context(|| format!("parsing transactions from {path:?}"))?;
    Ok(records)
}
