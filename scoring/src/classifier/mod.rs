pub mod logistic;
pub mod scaler;

pub use logistic::LogisticClassifier;
pub use scaler::StandardScaler;

use crate::{
    error::ScoringError,
    model::{ClassifierVerdict, ScaledFeatures},
};

/// A trained binary fraud model, treated as a black box.
///
/// Implementations receive features that were already standardized and must
/// return a label with a probability pair summing to one.
pub trait ClassifierAdapter: Send + Sync {
    fn classify(&self, features: &ScaledFeatures) -> Result<ClassifierVerdict, ScoringError>;
}

impl<C: ClassifierAdapter + ?Sized> ClassifierAdapter for Box<C> {
    fn classify(&self, features: &ScaledFeatures) -> Result<ClassifierVerdict, ScoringError> {
        (**self).classify(features)
    }
}
