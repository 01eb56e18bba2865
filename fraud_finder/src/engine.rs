use common::config::Config;
use std::sync::Arc;

use scoring::{
    classifier::{LogisticClassifier, StandardScaler},
    combiner::ScoreCombiner,
    error::ScoringError,
    scorers::{RuleScorer, ScoringLists},
};

pub type FraudEngine = ScoreCombiner<RuleScorer, LogisticClassifier>;

/// Builds the engine from the `classifier`, `engine` and `lists` sections.
pub fn engine_from_config(config: &Config) -> Result<FraudEngine, ScoringError> {
    let lists = Arc::new(ScoringLists::from_config(&config.lists));
    let scaler = StandardScaler::from_config(&config.classifier.scaler)?;
    let classifier = LogisticClassifier::from_config(&config.classifier.model)?;

    Ok(ScoreCombiner::with_lists(
        lists,
        config.engine.perturbation,
        scaler,
        classifier,
    ))
}
