use mockall::mock;
use scoring::{
    classifier::ClassifierAdapter,
    error::ScoringError,
    model::{ClassifierVerdict, ScaledFeatures},
};

mock! {
    pub Classifier {}

    impl ClassifierAdapter for Classifier {
        fn classify(&self, features: &ScaledFeatures) -> Result<ClassifierVerdict, ScoringError>;
    }
}
