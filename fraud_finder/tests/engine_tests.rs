use common::config::{Config, PerturbationMode};
use fraud_finder::{EvaluationOutcome, TransactionRecord, engine_from_config, read_records};
use scoring::{
    error::ScoringError,
    model::{Confidence, ScoringPath, TransactionAttributes},
};
use std::path::{Path, PathBuf};

fn config_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("config").join(name)
}

fn dev_config() -> Config {
    Config::load_with_includes(config_path("dev.yaml")).unwrap()
}

#[test]
fn test_environment_configs_load() {
    let dev = dev_config();
    assert_eq!(dev.common.project_name, "fraud_finder");
    assert_eq!(dev.engine.perturbation, PerturbationMode::HashSeeded);
    assert_eq!(dev.classifier.scaler.mean.len(), 30);
    assert_eq!(dev.classifier.model.coefficients.len(), 30);

    let prod = Config::load_with_includes(config_path("prod.yaml")).unwrap();
    assert_eq!(prod.engine.perturbation, PerturbationMode::Random);
    assert_eq!(
        prod.lists.local_indicators,
        Some(vec!["local".to_string(), "domestic".to_string()])
    );
}

#[test]
fn test_everyday_purchase_scores_low() {
    let engine = engine_from_config(&dev_config()).unwrap();
    let tx = TransactionAttributes::new(
        12.99,
        "netflix.com",
        "New York, NY",
        "4532015112830366",
        "2024-01-15T12:00:00Z",
    );

    let verdict = engine.evaluate(&tx.into()).unwrap();

    assert!(!verdict.is_fraud());
    assert_eq!(verdict.rule_score(), 0);
    assert!(verdict.ml_probability() < 0.1, "{}", verdict.ml_probability());
    assert_eq!(verdict.confidence(), Confidence::High);
}

#[test]
fn test_obvious_fraud_is_flagged() {
    let engine = engine_from_config(&dev_config()).unwrap();
    let tx = TransactionAttributes::new(
        25_000.0,
        "xx",
        "International",
        "0000-0000-0000-0000",
        "2024-01-15T03:12:00Z",
    );

    let verdict = engine.evaluate(&tx.into()).unwrap();

    assert!(verdict.is_fraud());
    assert_eq!(verdict.confidence(), Confidence::High);
    assert_eq!(verdict.rule_score(), 400);
}

#[test]
fn test_dev_engine_is_reproducible() {
    let engine = engine_from_config(&dev_config()).unwrap();
    let prepared = TransactionRecord {
        amount: Some(6_500.0),
        merchant: Some("Acme Store".to_string()),
        location: Some("Chicago".to_string()),
        card_number: Some("5555555555554444".to_string()),
        timestamp: Some("2024-03-01T09:30:00Z".to_string()),
        ..Default::default()
    }
    .prepare();

    let first = engine.evaluate(&prepared.input).unwrap();
    let second = engine.evaluate(&prepared.input).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_bad_model_parameters_are_rejected() {
    let mut config = dev_config();
    config.classifier.model.coefficients.pop();

    let err = engine_from_config(&config).err().unwrap();

    assert!(matches!(err, ScoringError::Classifier { .. }));
}

#[test]
fn test_sample_batch_end_to_end() {
    let engine = engine_from_config(&dev_config()).unwrap();
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_transactions.json");
    let prepared: Vec<_> = read_records(&path)
        .unwrap()
        .into_iter()
        .map(TransactionRecord::prepare)
        .collect();
    let inputs: Vec<_> = prepared.iter().map(|p| p.input.clone()).collect();

    let results = engine.evaluate_batch(&inputs);
    let outcomes: Vec<_> = prepared
        .iter()
        .zip(results.iter())
        .map(|(p, r)| EvaluationOutcome::new(&p.attributes, r))
        .collect();

    assert_eq!(results.len(), 6);
    assert!(!results[0].as_ref().unwrap().is_fraud());
    assert!(results[1].as_ref().unwrap().is_fraud());
    assert_eq!(results[4].as_ref().unwrap().path(), ScoringPath::Explicit);
    assert!(matches!(
        outcomes[5],
        EvaluationOutcome::Failure { ref stage, .. } if stage == "time_feature"
    ));
}
