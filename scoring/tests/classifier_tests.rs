use common::config::{LogisticModelConfig, ScalerConfig};
use scoring::{
    classifier::{ClassifierAdapter, LogisticClassifier, StandardScaler},
    error::ScoringError,
    model::{FeatureVector, PredictedClass, ScaledFeatures, FEATURE_VECTOR_LEN},
};

fn scaled(time: f64, latent: f64, amount: f64) -> ScaledFeatures {
    StandardScaler::identity()
        .transform(&FeatureVector::from_parts(time, &[latent; 28], amount))
        .unwrap()
}

fn amount_only_model(threshold: f64) -> LogisticClassifier {
    let mut coefficients = vec![0.0; FEATURE_VECTOR_LEN];
    coefficients[29] = 1.0;
    LogisticClassifier::new(&coefficients, 0.0, threshold).unwrap()
}

#[test]
fn test_sigmoid_of_linear_score() {
    let verdict = amount_only_model(0.5)
        .classify(&scaled(0.0, 0.0, 2.0))
        .unwrap();

    let expected = 1.0 / (1.0 + (-2.0f64).exp());
    assert!((verdict.p_fraud - expected).abs() < 1e-12);
    assert!((verdict.p_legitimate + verdict.p_fraud - 1.0).abs() < 1e-12);
    assert_eq!(verdict.class, PredictedClass::Fraud);
    assert!(verdict.validate().is_ok());
}

#[test]
fn test_threshold_is_inclusive() {
    let features = scaled(0.0, 0.0, 0.0);

    assert_eq!(
        amount_only_model(0.5).classify(&features).unwrap().class,
        PredictedClass::Fraud
    );
    assert_eq!(
        amount_only_model(0.6).classify(&features).unwrap().class,
        PredictedClass::Legitimate
    );
}

#[test]
fn test_model_parameters_are_validated() {
    let err = LogisticClassifier::new(&[0.0; 29], 0.0, 0.5).unwrap_err();
    assert!(matches!(err, ScoringError::Classifier { .. }));

    let err = LogisticClassifier::new(&[0.0; 30], f64::NAN, 0.5).unwrap_err();
    assert!(err.to_string().contains("finite"));

    let err = LogisticClassifier::new(&[0.0; 30], 0.0, 1.5).unwrap_err();
    assert!(err.to_string().contains("threshold"));
}

#[test]
fn test_built_from_config() {
    let config = LogisticModelConfig {
        coefficients: vec![0.0; FEATURE_VECTOR_LEN],
        intercept: -3.0,
        threshold: 0.5,
    };

    let verdict = LogisticClassifier::from_config(&config)
        .unwrap()
        .classify(&scaled(10.0, 1.0, 10.0))
        .unwrap();

    assert_eq!(verdict.class, PredictedClass::Legitimate);
    assert!(verdict.p_fraud < 0.05);
}

#[test]
fn test_scaler_from_config_guards_zero_scale() {
    let config = ScalerConfig {
        mean: vec![1.0; FEATURE_VECTOR_LEN],
        scale: vec![0.0; FEATURE_VECTOR_LEN],
    };

    let scaler = StandardScaler::from_config(&config).unwrap();
    let features = scaler
        .transform(&FeatureVector::from_parts(3.0, &[1.0; 28], -1.0))
        .unwrap();

    assert_eq!(features.as_slice()[0], 2.0);
    assert_eq!(features.as_slice()[5], 0.0);
    assert_eq!(features.as_slice()[29], -2.0);
}

#[test]
fn test_feature_vector_from_slice_checks_length() {
    assert!(FeatureVector::from_slice(&[0.0; FEATURE_VECTOR_LEN]).is_ok());

    let err = FeatureVector::from_slice(&[0.0; 31]).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::FeatureVectorLength {
            expected: 30,
            actual: 31
        }
    ));
}
