use common::config::LogisticModelConfig;

use crate::{
    classifier::ClassifierAdapter,
    error::ScoringError,
    model::{ClassifierVerdict, PredictedClass, ScaledFeatures, FEATURE_VECTOR_LEN},
};

/// Logistic regression over the scaled feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticClassifier {
    coefficients: [f64; FEATURE_VECTOR_LEN],
    intercept: f64,
    threshold: f64,
}

impl LogisticClassifier {
    pub fn new(coefficients: &[f64], intercept: f64, threshold: f64) -> Result<Self, ScoringError> {
        let coefficients: [f64; FEATURE_VECTOR_LEN] = coefficients.try_into().map_err(|_| {
            ScoringError::classifier(format!(
                "model needs {FEATURE_VECTOR_LEN} coefficients, got {}",
                coefficients.len()
            ))
        })?;
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ScoringError::classifier("model parameters must be finite"));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ScoringError::classifier(format!(
                "decision threshold must lie in [0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            coefficients,
            intercept,
            threshold,
        })
    }

    pub fn from_config(config: &LogisticModelConfig) -> Result<Self, ScoringError> {
        Self::new(&config.coefficients, config.intercept, config.threshold)
    }
}

impl ClassifierAdapter for LogisticClassifier {
    fn classify(&self, features: &ScaledFeatures) -> Result<ClassifierVerdict, ScoringError> {
        let logit = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p_fraud = 1.0 / (1.0 + (-logit).exp());

        if !p_fraud.is_finite() {
            return Err(ScoringError::classifier(format!(
                "logit {logit} produced no probability"
            )));
        }

        let class = if p_fraud >= self.threshold {
            PredictedClass::Fraud
        } else {
            PredictedClass::Legitimate
        };
        Ok(ClassifierVerdict::from_fraud_probability(class, p_fraud))
    }
}
