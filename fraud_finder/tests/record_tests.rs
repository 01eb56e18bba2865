use fraud_finder::{TransactionRecord, read_records};
use scoring::{model::TransactionInput, timestamp};
use std::{io::Write, path::Path};

fn latent(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 / 10.0).collect()
}

#[test]
fn test_missing_fields_get_defaults() {
    let prepared = TransactionRecord::default().prepare();

    assert_eq!(prepared.attributes.amount, 0.0);
    assert_eq!(prepared.attributes.merchant, "Unknown");
    assert_eq!(prepared.attributes.location, "Unknown");
    assert_eq!(prepared.attributes.card_number, "");
    assert!(timestamp::parse_iso8601(&prepared.attributes.timestamp).is_ok());
    assert_eq!(
        prepared.input,
        TransactionInput::DerivedFeatures(prepared.attributes.clone())
    );
}

#[test]
fn test_camel_case_fields_are_read() {
    let record: TransactionRecord = serde_json::from_str(
        r#"{"amount": 10.5, "merchant": "m", "location": "l",
            "cardNumber": "4111 1111 1111 1111", "timestamp": "2024-01-15T12:00:00Z"}"#,
    )
    .unwrap();

    let prepared = record.prepare();

    assert_eq!(prepared.attributes.card_number, "4111 1111 1111 1111");
    assert_eq!(prepared.attributes.timestamp, "2024-01-15T12:00:00Z");
    assert_eq!(prepared.attributes.amount, 10.5);
}

#[test]
fn test_exactly_28_values_select_explicit_path() {
    let record = TransactionRecord {
        amount: Some(149.62),
        time: Some(406.0),
        v_values: Some(latent(28)),
        ..Default::default()
    };

    let prepared = record.prepare();

    match prepared.input {
        TransactionInput::ExplicitFeatures(features) => {
            assert_eq!(features.time, 406.0);
            assert_eq!(features.amount, 149.62);
            assert_eq!(features.features[27], 2.7);
        }
        other => panic!("expected explicit features, got {other:?}"),
    }
}

#[test]
fn test_wrong_length_falls_back_to_attributes() {
    for count in [0, 27, 29] {
        let record = TransactionRecord {
            amount: Some(5.0),
            merchant: Some("netflix.com".to_string()),
            v_values: Some(latent(count)),
            ..Default::default()
        };

        let prepared = record.prepare();

        assert!(
            matches!(prepared.input, TransactionInput::DerivedFeatures(_)),
            "{count} values"
        );
    }
}

#[test]
fn test_read_records_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"amount": 1.0}, {"merchant": "shop"}]"#)
        .unwrap();

    let records = read_records(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].amount, Some(1.0));
    assert_eq!(records[1].merchant.as_deref(), Some("shop"));
}

#[test]
fn test_read_records_reports_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();

    let err = read_records(file.path()).unwrap_err();

    assert!(err.to_string().contains("parsing transactions"));
}

#[test]
fn test_sample_data_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_transactions.json");

    let records = read_records(&path).unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[4].v_values.as_ref().map(Vec::len), Some(28));
}
