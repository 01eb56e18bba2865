//! Hybrid fraud-scoring engine.
//!
//! Combines an explainable rule scorer with a statistical classifier. When a
//! transaction arrives without a feature vector, one is synthesized from its
//! attributes before the classifier runs.

pub mod classifier;
pub mod combiner;
pub mod error;
pub mod executable_utils;
pub mod features;
pub mod model;
pub mod scorers;
pub mod timestamp;

pub use classifier::{ClassifierAdapter, LogisticClassifier, StandardScaler};
pub use combiner::ScoreCombiner;
pub use error::{ScoringError, Stage};
pub use features::FeatureSynthesizer;
pub use scorers::{CardPatternValidator, RuleScorer, Scorer, ScoringLists};
