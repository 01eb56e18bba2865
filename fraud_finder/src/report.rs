use serde::Serialize;

use scoring::{
    error::ScoringError,
    model::{CombinedVerdict, Confidence, RiskFactor, TransactionAttributes},
};

/// Caller-facing summary of one evaluated transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub amount: f64,
    pub merchant: String,
    pub location: String,
    pub card_number: String,
    pub timestamp: String,
    pub fraud_probability: f64,
    /// Combined score truncated to an integer.
    pub risk_score: u32,
    pub rule_score: u32,
    pub is_genuine: bool,
    pub confidence: Confidence,
    pub factors: Vec<RiskFactor>,
}

impl AnalysisReport {
    pub fn new(attributes: &TransactionAttributes, verdict: &CombinedVerdict) -> Self {
        Self {
            amount: attributes.amount,
            merchant: attributes.merchant.clone(),
            location: attributes.location.clone(),
            card_number: attributes.card_number.clone(),
            timestamp: attributes.timestamp.clone(),
            fraud_probability: verdict.ml_probability(),
            risk_score: verdict.combined_score().trunc() as u32,
            rule_score: verdict.rule_score(),
            is_genuine: !verdict.is_fraud(),
            confidence: verdict.confidence(),
            factors: verdict.factors().to_vec(),
        }
    }
}

/// Per-record line of the evaluator's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvaluationOutcome {
    Report(AnalysisReport),
    Failure { error: String, stage: String },
}

impl EvaluationOutcome {
    pub fn new(
        attributes: &TransactionAttributes,
        result: &Result<CombinedVerdict, ScoringError>,
    ) -> Self {
        match result {
            Ok(verdict) => EvaluationOutcome::Report(AnalysisReport::new(attributes, verdict)),
            Err(e) => EvaluationOutcome::Failure {
                error: e.to_string(),
                stage: e.stage().to_string(),
            },
        }
    }
}
