pub mod feature_vector;
pub mod transaction;
pub mod verdict;

/// Number of latent features between `time` and `amount`.
pub const LATENT_FEATURE_COUNT: usize = 28;

/// Length of the classifier input: time, 28 latent features, amount.
pub const FEATURE_VECTOR_LEN: usize = LATENT_FEATURE_COUNT + 2;

pub use feature_vector::{FeatureVector, ScaledFeatures};
pub use transaction::{ExplicitFeatures, TransactionAttributes, TransactionInput};
pub use verdict::{
    CardValidationResult, ClassifierVerdict, CombinedVerdict, Confidence, FactorCategory,
    PredictedClass, Prediction, RiskAssessment, RiskFactor, ScoringPath,
};
