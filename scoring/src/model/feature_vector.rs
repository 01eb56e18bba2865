use crate::{
    error::ScoringError,
    model::{FEATURE_VECTOR_LEN, LATENT_FEATURE_COUNT},
};

/// `[time, f1..f28, amount]`, always exactly 30 values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_VECTOR_LEN],
}

impl FeatureVector {
    pub fn from_parts(time: f64, latent: &[f64; LATENT_FEATURE_COUNT], amount: f64) -> Self {
        let mut values = [0.0; FEATURE_VECTOR_LEN];
        values[0] = time;
        values[1..=LATENT_FEATURE_COUNT].copy_from_slice(latent);
        values[FEATURE_VECTOR_LEN - 1] = amount;
        Self { values }
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, ScoringError> {
        let values = values
            .try_into()
            .map_err(|_| ScoringError::FeatureVectorLength {
                expected: FEATURE_VECTOR_LEN,
                actual: values.len(),
            })?;
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// A feature vector after the pre-fitted standardization has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatures {
    values: [f64; FEATURE_VECTOR_LEN],
}

impl ScaledFeatures {
    pub(crate) fn new(values: [f64; FEATURE_VECTOR_LEN]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
