// FICHIER : tests/schema_suite/partial_updates.rs

//! Cycle complet d'une mise à jour : forme stockée -> revalidation ->
//! fusion partielle -> nouvelle forme stockée.

use crate::base_patient;
use dossier_patient::schema::{RecordValidator, ViolationKind};
use serde_json::json;

#[test]
fn test_stored_form_revalidates_identically() {
    let validator = RecordValidator::standard();
    let record = validator.validate(&base_patient()).unwrap();

    // La forme stockée repasse par le validateur sans perte
    let reread = validator.validate(&record.to_stored_value()).unwrap();
    assert_eq!(reread, record);
}

#[test]
fn test_update_cycle_recomputes_derived_fields() {
    let validator = RecordValidator::standard();
    let existing = validator.validate(&base_patient()).unwrap();

    let updated = validator
        .merge_update(&existing, &json!({ "weight": 50.0 }))
        .unwrap();
    assert_eq!(updated.bmi(), 19.53);
    assert_eq!(updated.verdict().to_string(), "Healthy");

    // Les dérivés ne s'infiltrent pas dans la nouvelle forme stockée
    let stored = updated.to_stored_value();
    assert!(stored.get("bmi").is_none());
    assert!(stored.get("verdict").is_none());
    assert_eq!(stored["weight"], json!(50.0));
}

#[test]
fn test_client_supplied_identity_is_ignored() {
    let validator = RecordValidator::standard();
    let existing = validator.validate(&base_patient()).unwrap();

    let updated = validator
        .merge_update(&existing, &json!({ "id": "P999", "city": "Lyon" }))
        .unwrap();
    assert_eq!(updated.id(), "P001");
    assert_eq!(updated.city(), Some("Lyon"));
}

#[test]
fn test_partial_name_is_normalized_like_a_creation() {
    let validator = RecordValidator::standard();
    let existing = validator.validate(&base_patient()).unwrap();

    let updated = validator
        .merge_update(&existing, &json!({ "name": "bruno" }))
        .unwrap();
    assert_eq!(updated.name(), "BRUNO");
}

#[test]
fn test_invalid_partial_leaves_no_half_merged_state() {
    let validator = RecordValidator::standard();
    let existing = validator.validate(&base_patient()).unwrap();

    // Un lot contenant une valeur valide ET une invalide est rejeté en bloc
    let err = validator
        .merge_update(&existing, &json!({ "city": "Lyon", "age": 300 }))
        .unwrap_err();
    assert!(err.contains(ViolationKind::RangeViolation));

    // Le dossier d'origine n'a pas bougé
    assert_eq!(existing.city(), None);
    assert_eq!(existing.age(), 65);
}

#[test]
fn test_aging_into_threshold_requires_emergency_contact() {
    let validator = RecordValidator::standard();
    let mut raw = base_patient();
    raw["age"] = json!(59);
    raw["contact_number"] = json!({ "mobile": "111" });
    let existing = validator.validate(&raw).unwrap();

    // Passer le seuil via une mise à jour déclenche la contrainte croisée
    let err = validator
        .merge_update(&existing, &json!({ "age": 60 }))
        .unwrap_err();
    assert!(err.contains(ViolationKind::CrossFieldViolation));
    assert!(err.touches("contact_number"));
}
