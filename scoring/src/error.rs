use strum_macros::Display;
use thiserror::Error;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stage {
    #[strum(to_string = "input_validation")]
    InputValidation,
    #[strum(to_string = "time_feature")]
    TimeFeature,
    #[strum(to_string = "scaling")]
    Scaling,
    #[strum(to_string = "classification")]
    Classification,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("malformed timestamp {value:?} in stage {stage}: {source}")]
    MalformedTimestamp {
        stage: Stage,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("feature vector must hold exactly {expected} values, got {actual}")]
    FeatureVectorLength { expected: usize, actual: usize },

    #[error("feature scaling failed: {message}")]
    Scaling { message: String },

    #[error("classifier failed: {message}")]
    Classifier { message: String },
}

impl ScoringError {
    pub fn stage(&self) -> Stage {
        match self {
            ScoringError::MalformedTimestamp { stage, .. } => *stage,
            ScoringError::FeatureVectorLength { .. } => Stage::InputValidation,
            ScoringError::Scaling { .. } => Stage::Scaling,
            ScoringError::Classifier { .. } => Stage::Classification,
        }
    }

    pub fn scaling(message: impl Into<String>) -> Self {
        Self::Scaling {
            message: message.into(),
        }
    }

    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier {
            message: message.into(),
        }
    }
}
