// FICHIER : tests/schema_suite/validation_rules.rs

use crate::base_patient;
use dossier_patient::schema::{RecordValidator, ViolationKind};
use serde_json::json;

#[test]
fn test_senior_without_emergency_contact_rejected() {
    let mut raw = base_patient();
    raw["contact_number"] = json!({ "mobile": "111" });

    let err = RecordValidator::standard().validate(&raw).unwrap_err();
    assert!(err.contains(ViolationKind::CrossFieldViolation));
    assert!(err.touches("contact_number"));
}

#[test]
fn test_senior_with_emergency_contact_accepted() {
    let record = RecordValidator::standard()
        .validate(&base_patient())
        .expect("dossier valide");

    assert_eq!(record.name(), "ANA");
    assert_eq!(record.bmi(), 27.34);
    assert_eq!(record.verdict().to_string(), "Overweight");
}

#[test]
fn test_every_required_field_reported_at_once() {
    let err = RecordValidator::standard()
        .validate(&json!({}))
        .unwrap_err();

    for field in ["id", "name", "age", "gender", "height", "weight", "contact_number"] {
        assert!(err.touches(field), "champ '{}' non signalé", field);
    }
    assert!(err
        .violations
        .iter()
        .all(|v| v.kind == ViolationKind::MissingField));
}

#[test]
fn test_integer_weight_rejected_without_coercion() {
    let mut raw = base_patient();
    raw["weight"] = json!(70);

    let err = RecordValidator::standard().validate(&raw).unwrap_err();
    assert!(err.contains(ViolationKind::TypeMismatch));
    assert!(err.touches("weight"));
}

#[test]
fn test_six_allergies_is_length_violation() {
    let mut raw = base_patient();
    raw["allergies"] = json!(["a", "b", "c", "d", "e", "f"]);

    let err = RecordValidator::standard().validate(&raw).unwrap_err();
    assert!(err.contains(ViolationKind::LengthViolation));
}

#[test]
fn test_gender_outside_enum() {
    let mut raw = base_patient();
    raw["gender"] = json!("dragon");

    let err = RecordValidator::standard().validate(&raw).unwrap_err();
    assert!(err.contains(ViolationKind::EnumViolation));
    assert!(err.touches("gender"));
}

#[test]
fn test_age_bounds_are_exclusive() {
    let validator = RecordValidator::standard();

    for bad_age in [0, 120, -5, 400] {
        let mut raw = base_patient();
        raw["age"] = json!(bad_age);
        // En dessous de 60 ans le contact d'urgence n'est plus requis,
        // mais ces âges-là ne passent jamais la passe unitaire
        let err = validator.validate(&raw).unwrap_err();
        assert!(
            err.contains(ViolationKind::RangeViolation),
            "âge {} accepté à tort",
            bad_age
        );
    }
}

#[test]
fn test_email_variant_allow_list() {
    let validator = RecordValidator::with_email();

    let mut raw = base_patient();
    raw["email"] = json!("ana@icic.com");
    assert!(validator.validate(&raw).is_ok());

    raw["email"] = json!("ana@banque.fr");
    let err = validator.validate(&raw).unwrap_err();
    assert!(err.contains(ViolationKind::CrossFieldViolation));
    assert!(err.touches("email"));
}

#[test]
fn test_validation_error_is_machine_readable() {
    let mut raw = base_patient();
    raw["height"] = json!(2);

    let err = RecordValidator::standard().validate(&raw).unwrap_err();
    let serialized = serde_json::to_value(&err).unwrap();
    let violations = serialized["violations"].as_array().unwrap();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["kind"], "TypeMismatch");
    assert_eq!(violations[0]["field"], "height");
    assert!(violations[0]["message"].is_string());
}
