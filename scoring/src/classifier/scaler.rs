use common::config::ScalerConfig;

use crate::{
    error::ScoringError,
    model::{FeatureVector, ScaledFeatures, FEATURE_VECTOR_LEN},
};

/// Per-feature standardization `(x - mean) / scale` with pre-fitted parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_VECTOR_LEN],
    scale: [f64; FEATURE_VECTOR_LEN],
}

impl StandardScaler {
    /// Zero scales are replaced by 1, as for constant features at fit time.
    pub fn new(mean: &[f64], scale: &[f64]) -> Result<Self, ScoringError> {
        let mean = fitted_parameters("mean", mean)?;
        let mut scale = fitted_parameters("scale", scale)?;
        for s in scale.iter_mut().filter(|s| **s == 0.0) {
            *s = 1.0;
        }
        Ok(Self { mean, scale })
    }

    pub fn from_config(config: &ScalerConfig) -> Result<Self, ScoringError> {
        Self::new(&config.mean, &config.scale)
    }

    /// Leaves features untouched.
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_VECTOR_LEN],
            scale: [1.0; FEATURE_VECTOR_LEN],
        }
    }

    pub fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatures, ScoringError> {
        let mut scaled = [0.0; FEATURE_VECTOR_LEN];
        for (i, value) in features.as_slice().iter().enumerate() {
            if !value.is_finite() {
                return Err(ScoringError::scaling(format!(
                    "feature {i} is not a finite number: {value}"
                )));
            }
            scaled[i] = (value - self.mean[i]) / self.scale[i];
            if !scaled[i].is_finite() {
                return Err(ScoringError::scaling(format!(
                    "feature {i} overflowed during scaling"
                )));
            }
        }
        Ok(ScaledFeatures::new(scaled))
    }
}

fn fitted_parameters(
    name: &str,
    values: &[f64],
) -> Result<[f64; FEATURE_VECTOR_LEN], ScoringError> {
    let parameters: [f64; FEATURE_VECTOR_LEN] = values.try_into().map_err(|_| {
        ScoringError::scaling(format!(
            "scaler {name} needs {FEATURE_VECTOR_LEN} values, got {}",
            values.len()
        ))
    })?;
    if let Some(bad) = parameters.iter().find(|v| !v.is_finite()) {
        return Err(ScoringError::scaling(format!(
            "scaler {name} contains a non-finite value: {bad}"
        )));
    }
    Ok(parameters)
}
