//! End-to-end scenarios for credit transfer validation and classification

use chrono::{Duration, NaiveDate};
use sepa_transfer::{
    batch, Config, CreditTransferTransaction, Error, ErrorKind, Field, SchemaVariant,
    ValidationContext,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn build(value: Value) -> CreditTransferTransaction {
    match value {
        Value::Object(map) => CreditTransferTransaction::from_attributes(&map).unwrap(),
        _ => panic!("attributes must be an object"),
    }
}

fn telekomiker(extra: Value) -> CreditTransferTransaction {
    let mut attrs = json!({
        "name": "Telekomiker AG",
        "iban": "FR7630003012340001234567854",
        "bic": "SOGEFRPP",
        "amount": 406.57,
        "reference": "XYZ-1234/123",
        "remittance_information": "Rechnung 123 vom 22.08.2013"
    });
    if let (Value::Object(base), Value::Object(extra)) = (&mut attrs, extra) {
        base.extend(extra);
    }
    build(attrs)
}

#[test]
fn test_valid_base_transfer() {
    let tx = build(json!({
        "name": "Acme",
        "iban": "DE37112589611964645802",
        "bic": "PBNKDEFF370",
        "amount": 102.50,
        "currency": "EUR"
    }));

    assert!(tx.validate().is_valid());
    assert_eq!(tx.service_level(), Some("SEPA"));
    assert_eq!(
        tx.compatible_variants(),
        BTreeSet::from([
            SchemaVariant::Pain00100103,
            SchemaVariant::Pain00100203,
            SchemaVariant::Pain00100303,
        ])
    );
}

#[test]
fn test_incompatible_instrument() {
    let tx = build(json!({"currency": "EUR", "service_level": "URGP", "local_instrument": "INST"}));
    let report = tx.validate();

    let errors = report.errors_on(Field::LocalInstrument);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::IncompatibleCombination);
    assert!(report
        .violations()
        .iter()
        .all(|v| v.kind != ErrorKind::IncompatibleCombination || v.field == Field::LocalInstrument));

    assert!(!tx.schema_compatible(SchemaVariant::Pain00100103));
    assert!(!tx.schema_compatible(SchemaVariant::Pain00100203));
    assert!(!tx.schema_compatible(SchemaVariant::Pain00100303));
}

#[test]
fn test_inst_with_sepa_service_level_is_valid() {
    let tx = telekomiker(json!({"currency": "EUR", "service_level": "SEPA", "local_instrument": "INST"}));
    assert!(tx.validate().is_valid());
}

#[test]
fn test_inst_with_defaulted_service_level_is_valid() {
    let tx = telekomiker(json!({"currency": "EUR", "local_instrument": "INST"}));
    assert_eq!(tx.service_level(), Some("SEPA"));
    assert!(tx.validate().is_valid());
}

#[test]
fn test_inst_with_urgp_is_invalid() {
    let tx = telekomiker(json!({"local_instrument": "INST", "service_level": "URGP"}));
    let report = tx.validate();
    assert!(!report.is_valid());
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors_on(Field::LocalInstrument).len(), 1);
}

#[test]
fn test_inst_without_service_level_is_invalid() {
    let tx = telekomiker(json!({"currency": "CHF", "local_instrument": "INST"}));
    assert!(report_has(&tx, Field::LocalInstrument, ErrorKind::IncompatibleCombination));
}

fn report_has(tx: &CreditTransferTransaction, field: Field, kind: ErrorKind) -> bool {
    tx.validate().has(field, kind)
}

#[test]
fn test_requested_date() {
    let ctx = ValidationContext::today();
    let today = ctx.reference_date;
    let accepted = [
        None,
        NaiveDate::from_ymd_opt(1999, 1, 1),
        Some(today),
        Some(today + Duration::days(1)),
        Some(today + Duration::days(2)),
    ];
    for date in accepted {
        let tx = telekomiker(json!({"requested_date": date.map(|d| d.to_string())}));
        assert!(tx.validate_with(&ctx).is_valid(), "expected {:?} to be accepted", date);
    }

    let rejected = [NaiveDate::from_ymd_opt(1995, 12, 21), Some(today - Duration::days(1))];
    for date in rejected {
        let tx = telekomiker(json!({"requested_date": date.map(|d| d.to_string())}));
        let report = tx.validate_with(&ctx);
        assert!(report.has(Field::RequestedDate, ErrorKind::PastDate), "expected {:?} to be rejected", date);
    }

    let next_month = today + Duration::days(30);
    let tx = telekomiker(json!({"requested_date": next_month.to_string()}));
    assert!(tx.validate().is_valid());
}

#[test]
fn test_stale_date_is_reevaluated() {
    let requested = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let tx = telekomiker(json!({"requested_date": "2026-10-20"}));

    assert!(tx.validate_with(&ValidationContext::on(requested)).is_valid());
    let later = ValidationContext::on(requested + Duration::days(1));
    assert!(tx.validate_with(&later).has(Field::RequestedDate, ErrorKind::PastDate));
}

#[test]
fn test_category_purpose() {
    for value in [json!(null), json!("SALA"), json!("XXXX"), json!("X")] {
        let tx = telekomiker(json!({"category_purpose": value}));
        assert!(tx.validate().is_valid(), "expected {} to be accepted", value);
    }
    for value in ["", "XXXXX"] {
        let tx = telekomiker(json!({"category_purpose": value}));
        assert!(tx.validate().has(Field::CategoryPurpose, ErrorKind::InvalidLength));
    }
}

#[test]
fn test_local_instrument_values() {
    for value in [json!(null), json!("INST")] {
        assert!(telekomiker(json!({"local_instrument": value})).validate().is_valid());
    }
    for value in ["SEPA", "XXXXX"] {
        let tx = telekomiker(json!({"local_instrument": value}));
        assert!(tx.validate().has(Field::LocalInstrument, ErrorKind::InvalidValue));
    }
}

#[test]
fn test_two_violations_are_both_reported() {
    let tx = telekomiker(json!({"category_purpose": "TOOLONG", "service_level": "EXPR"}));
    let report = tx.validate();
    assert_eq!(report.len(), 2);
    assert!(report.has(Field::CategoryPurpose, ErrorKind::InvalidLength));
    assert!(report.has(Field::ServiceLevel, ErrorKind::InvalidValue));
}

#[test]
fn test_validation_is_idempotent() {
    let tx = telekomiker(json!({"category_purpose": "", "amount": 0}));
    let ctx = ValidationContext::on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    assert_eq!(tx.validate_with(&ctx), tx.validate_with(&ctx));
}

#[test]
fn test_oversized_amount_is_reported_not_raised() {
    let tx = CreditTransferTransaction::from_json(
        r#"{"name": "Acme", "iban": "DE37112589611964645802", "amount": 1e30}"#,
    )
    .unwrap();
    let report = tx.validate();
    assert_eq!(report.len(), 1);
    assert!(report.has(Field::Amount, ErrorKind::InvalidValue));

    let tx = CreditTransferTransaction::from_json(
        r#"{"name": "Acme", "iban": "DE37112589611964645802", "amount": "102.125"}"#,
    )
    .unwrap();
    assert_eq!(tx.base().amount(), Some(rust_decimal::Decimal::new(10213, 2)));
}

#[test]
fn test_swiss_transfer_compatibility() {
    let tx = build(json!({"bic": "SPUEDE2UXXX", "currency": "CHF"}));
    assert!(tx.is_schema_compatible("pain.001.001.03.ch.02").unwrap());
    assert!(tx.is_schema_compatible("pain.001.001.03").unwrap());
    assert!(!tx.is_schema_compatible("pain.001.002.03").unwrap());
    assert!(!tx.is_schema_compatible("pain.001.003.03").unwrap());
}

#[test]
fn test_unknown_inputs_are_usage_errors() {
    let tx = build(json!({}));
    let err = tx.is_schema_compatible("pain.001.001.99").unwrap_err();
    assert!(matches!(err, Error::UnknownSchemaVariant(_)));
    assert!(err.is_usage_error());

    let err = CreditTransferTransaction::from_json(r#"{"purpose": "SALA"}"#).unwrap_err();
    assert!(matches!(err, Error::UnknownField(ref name) if name == "purpose"));

    let err = CreditTransferTransaction::from_json(r#"{"amount": {"value": 1}}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidAttributeType { field: Field::Amount, .. }));
}

#[test]
fn test_config_drives_context_and_batch() {
    let mut config = Config::default();
    config.validation.reference_date = NaiveDate::from_ymd_opt(2030, 1, 1);
    config.validation.max_amount = rust_decimal::Decimal::from(100);
    let ctx = ValidationContext::from_config(&config);

    let tx = telekomiker(json!({"requested_date": "2029-12-31"}));
    let report = tx.validate_with(&ctx);
    assert!(report.has(Field::RequestedDate, ErrorKind::PastDate));
    assert!(report.has(Field::Amount, ErrorKind::InvalidValue));

    let batch = vec![tx, telekomiker(json!({"bic": null}))];
    assert_eq!(
        batch::select_variant(&batch, &config.schema.preference),
        Some(SchemaVariant::Pain00100103)
    );
}
