use common::config::PerturbationMode;
use metrics::{counter, histogram};
use std::{sync::Arc, time::Instant};
#[cfg(not(test))]
use tracing::{debug, info, warn};
#[cfg(test)]
use {println as debug, println as info, println as warn};

use crate::{
    classifier::{ClassifierAdapter, StandardScaler},
    error::{ScoringError, Stage},
    features::FeatureSynthesizer,
    model::{
        ClassifierVerdict, CombinedVerdict, Confidence, ExplicitFeatures, FeatureVector,
        PredictedClass, Prediction, RiskFactor, ScoringPath, TransactionAttributes,
        TransactionInput,
    },
    scorers::{RuleScorer, Scorer, ScoringLists},
    timestamp,
};

pub const RULE_WEIGHT: f64 = 0.6;
pub const ML_WEIGHT: f64 = 0.4;

pub const HIGH_CONFIDENCE_FRAUD: f64 = 50.0;
pub const MEDIUM_CONFIDENCE_FRAUD: f64 = 30.0;
pub const MEDIUM_CONFIDENCE_LEGITIMATE: f64 = 15.0;

/// Maps a combined score onto `(is_fraud, confidence)`.
///
/// Bands are checked from the top down; the first one reached wins.
pub fn verdict_band(combined_score: f64) -> (bool, Confidence) {
    if combined_score >= HIGH_CONFIDENCE_FRAUD {
        (true, Confidence::High)
    } else if combined_score >= MEDIUM_CONFIDENCE_FRAUD {
        (true, Confidence::Medium)
    } else if combined_score >= MEDIUM_CONFIDENCE_LEGITIMATE {
        (false, Confidence::Medium)
    } else {
        (false, Confidence::High)
    }
}

fn classifier_factor(class: PredictedClass) -> RiskFactor {
    match class {
        PredictedClass::Fraud => RiskFactor::HighFraudProbability,
        PredictedClass::Legitimate => RiskFactor::LegitimatePattern,
    }
}

/// Orchestrates rule scoring, feature synthesis and the classifier into one verdict.
///
/// Holds no mutable state, so one instance can serve any number of threads.
pub struct ScoreCombiner<S: Scorer, C: ClassifierAdapter> {
    scorer: S,
    synthesizer: FeatureSynthesizer,
    scaler: StandardScaler,
    classifier: C,
}

impl<C: ClassifierAdapter> ScoreCombiner<RuleScorer, C> {
    /// Rule scorer and synthesizer sharing one set of lists.
    pub fn with_lists(
        lists: Arc<ScoringLists>,
        perturbation: PerturbationMode,
        scaler: StandardScaler,
        classifier: C,
    ) -> Self {
        Self::new(
            RuleScorer::new(lists.clone()),
            FeatureSynthesizer::new(lists, perturbation),
            scaler,
            classifier,
        )
    }
}

impl<S, C> ScoreCombiner<S, C>
where
    S: Scorer,
    C: ClassifierAdapter,
{
    pub fn new(
        scorer: S,
        synthesizer: FeatureSynthesizer,
        scaler: StandardScaler,
        classifier: C,
    ) -> Self {
        info!(
            "Initializing score combiner (perturbation: {:?})",
            synthesizer.mode()
        );
        Self {
            scorer,
            synthesizer,
            scaler,
            classifier,
        }
    }

    pub fn evaluate(&self, input: &TransactionInput) -> Result<CombinedVerdict, ScoringError> {
        let started = Instant::now();

        let (path, result) = match input {
            TransactionInput::ExplicitFeatures(features) => {
                (ScoringPath::Explicit, self.evaluate_explicit(features))
            }
            TransactionInput::DerivedFeatures(attributes) => {
                (ScoringPath::Derived, self.evaluate_derived(attributes))
            }
        };

        histogram!("fraud_evaluation_seconds", "path" => path.to_string())
            .record(started.elapsed().as_secs_f64());

        match &result {
            Ok(verdict) => {
                let outcome = if verdict.is_fraud() { "fraud" } else { "legitimate" };
                counter!("fraud_evaluations_total", "path" => path.to_string(), "verdict" => outcome)
                    .increment(1);
                info!(
                    "Evaluated {} transaction: fraud={} score={:.2} confidence={}",
                    path,
                    verdict.is_fraud(),
                    verdict.combined_score(),
                    verdict.confidence()
                );
            }
            Err(e) => {
                counter!("fraud_evaluations_total", "path" => path.to_string(), "verdict" => "error")
                    .increment(1);
                warn!("Evaluation failed in stage {}: {}", e.stage(), e);
            }
        }

        result
    }

    /// Evaluates every item on its own; one failure does not affect the rest.
    pub fn evaluate_batch(
        &self,
        inputs: &[TransactionInput],
    ) -> Vec<Result<CombinedVerdict, ScoringError>> {
        debug!("Evaluating batch of {} transactions", inputs.len());
        inputs.iter().map(|input| self.evaluate(input)).collect()
    }

    /// Runs the classifier alone on caller-supplied features.
    pub fn predict(&self, features: &ExplicitFeatures) -> Result<Prediction, ScoringError> {
        let vector = FeatureVector::from_parts(features.time, &features.features, features.amount);
        self.classify(&vector).map(Prediction::from)
    }

    fn evaluate_explicit(&self, features: &ExplicitFeatures) -> Result<CombinedVerdict, ScoringError> {
        let prediction = self.predict(features)?;

        let combined_score = (prediction.fraud_probability * 100.0).trunc();
        let (_, confidence) = verdict_band(combined_score);

        Ok(CombinedVerdict::new(
            prediction.class == PredictedClass::Fraud,
            combined_score,
            0,
            prediction.fraud_probability,
            confidence,
            prediction.class,
            ScoringPath::Explicit,
            vec![classifier_factor(prediction.class)],
        ))
    }

    fn evaluate_derived(
        &self,
        attributes: &TransactionAttributes,
    ) -> Result<CombinedVerdict, ScoringError> {
        let assessment = self.scorer.score(attributes);
        debug!(
            "Rule score {} from {} factors",
            assessment.score,
            assessment.factors.len()
        );

        let time = timestamp::epoch_seconds(&attributes.timestamp).map_err(|source| {
            ScoringError::MalformedTimestamp {
                stage: Stage::TimeFeature,
                value: attributes.timestamp.clone(),
                source,
            }
        })?;

        let synthetic = self.synthesizer.synthesize(attributes);
        let vector = FeatureVector::from_parts(time as f64, &synthetic.values, attributes.amount);
        let verdict = self.classify(&vector)?;

        let combined_score =
            RULE_WEIGHT * f64::from(assessment.score) + ML_WEIGHT * verdict.p_fraud * 100.0;
        let (is_fraud, confidence) = verdict_band(combined_score);

        let mut factors = assessment.factors;
        factors.push(classifier_factor(verdict.class));

        Ok(CombinedVerdict::new(
            is_fraud,
            combined_score,
            assessment.score,
            verdict.p_fraud,
            confidence,
            verdict.class,
            ScoringPath::Derived,
            factors,
        ))
    }

    fn classify(&self, vector: &FeatureVector) -> Result<ClassifierVerdict, ScoringError> {
        let scaled = self.scaler.transform(vector)?;
        let verdict = self.classifier.classify(&scaled)?;
        verdict.validate()?;
        debug!(
            "Classifier returned {} with p_fraud={:.4}",
            verdict.class, verdict.p_fraud
        );
        Ok(verdict)
    }
}
