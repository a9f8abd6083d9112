// FICHIER : tests/api_suite/http_errors.rs

//! Traduction des fautes en réponses HTTP : 422 pour une entrée
//! invalide (avec la liste des violations), 404, 409.

use crate::{base_patient, send, test_app};
use axum::http::StatusCode;
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn test_invalid_payload_is_422_with_violations() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    let mut payload = base_patient();
    payload["weight"] = json!(70); // entier : refusé
    payload["gender"] = json!("dragon");

    let (status, body) = send(&app, "POST", "/create", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let violations = body["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    let fields: Vec<_> = violations
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"weight"));
    assert!(fields.contains(&"gender"));
}

#[tokio::test]
async fn test_duplicate_identity_is_409() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    let (status, _) = send(&app, "POST", "/create", Some(base_patient())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/create", Some(base_patient())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("P001"));
}

#[tokio::test]
async fn test_unknown_identity_is_404() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    let (status, _) = send(&app, "GET", "/patient/fantome", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/edit/fantome", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/delete/fantome", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_after_delete_does_not_resurrect() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    send(&app, "POST", "/create", Some(base_patient())).await;
    send(&app, "DELETE", "/delete/P001", None).await;

    let (status, _) = send(&app, "PUT", "/edit/P001", Some(json!({ "city": "Lyon" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Le dossier supprimé n'est pas réapparu
    let (status, _) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_sort_params_are_422() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    let (status, body) = send(&app, "GET", "/view?sort_by=name", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["field"], "sort_by");
    assert_eq!(body["violations"][0]["kind"], "EnumViolation");

    let (status, body) = send(&app, "GET", "/view?sort_by=bmi&order=sideways", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["field"], "order");
}

#[tokio::test]
async fn test_invalid_partial_is_422_and_record_untouched() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir.path().join("patients.json")).await;

    send(&app, "POST", "/create", Some(base_patient())).await;

    let (status, _) = send(&app, "PUT", "/edit/P001", Some(json!({ "age": 300 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&app, "GET", "/patient/P001", None).await;
    assert_eq!(fetched["age"], json!(65));
}
