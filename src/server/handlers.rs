// FICHIER : src/server/handlers.rs

use super::SharedState;
use crate::schema::{PatientRecord, ValidationError, ViolationKind};
use crate::utils::prelude::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::cmp::Ordering;

pub async fn home() -> Json<Value> {
    Json(json!({ "message": "Service de dossiers patients" }))
}

pub async fn about() -> Json<Value> {
    Json(json!({
        "message": "API CRUD : validation déclarative des dossiers, IMC et verdict calculés à la lecture"
    }))
}

/// Relit un document du magasin à travers le validateur : les dérivés
/// sont recalculés à chaque lecture. Un document stocké qui ne passe
/// plus la validation est une corruption du magasin, pas une faute client.
fn revalidate(state: &SharedState, doc: &Value) -> Result<PatientRecord> {
    state
        .validator
        .validate(doc)
        .map_err(|e| AppError::Storage(format!("Document stocké non conforme : {}", e)))
}

// --- LECTURE ---

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub async fn view_patients(
    State(state): State<SharedState>,
    Query(params): Query<ViewParams>,
) -> Result<Json<Vec<PatientRecord>>> {
    let mut records = Vec::new();
    for doc in state.store.list().await {
        records.push(revalidate(&state, &doc)?);
    }

    let descending = match params.order.as_deref() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(_) => {
            return Err(ValidationError::single(
                ViolationKind::EnumViolation,
                "order",
                "Valeurs autorisées : asc, desc",
            )
            .into())
        }
    };

    if let Some(field) = params.sort_by.as_deref() {
        let key: fn(&PatientRecord) -> f64 = match field {
            "height" => |r| r.height(),
            "weight" => |r| r.weight(),
            "bmi" => |r| r.bmi(),
            _ => {
                return Err(ValidationError::single(
                    ViolationKind::EnumViolation,
                    "sort_by",
                    "Valeurs autorisées : height, weight, bmi",
                )
                .into())
            }
        };
        records.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
        if descending {
            records.reverse();
        }
    }

    Ok(Json(records))
}

pub async fn get_patient(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRecord>> {
    let doc = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Dossier '{}'", id)))?;
    Ok(Json(revalidate(&state, &doc)?))
}

// --- ÉCRITURE ---

pub async fn create_patient(
    State(state): State<SharedState>,
    Json(mut payload): Json<Value>,
) -> Result<(StatusCode, Json<PatientRecord>)> {
    // Identifiant généré si l'appelant n'en fournit pas
    if let Some(obj) = payload.as_object_mut() {
        if !obj.contains_key("id") {
            obj.insert(
                "id".to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
        }
    }

    let record = state.validator.validate(&payload)?;

    let inserted = state
        .store
        .insert(record.id(), record.to_stored_value())
        .await?;
    if !inserted {
        return Err(AppError::Conflict(format!(
            "Le dossier '{}' existe déjà",
            record.id()
        )));
    }

    info!(id = record.id(), "Dossier créé");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn edit_patient(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(partial): Json<Value>,
) -> Result<Json<PatientRecord>> {
    // Toute la séquence lecture-fusion-écriture se joue sous le verrou
    // d'écriture du magasin : une édition concurrente de la même
    // identité voit le résultat de celle-ci, jamais l'état antérieur
    let doc = state
        .store
        .update(&id, |current| {
            let existing = revalidate(&state, current)?;
            let merged = state.validator.merge_update(&existing, &partial)?;
            Ok(merged.to_stored_value())
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dossier '{}'", id)))?;

    let updated = revalidate(&state, &doc)?;
    info!(id = updated.id(), "Dossier mis à jour");
    Ok(Json(updated))
}

pub async fn delete_patient(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.store.remove(&id).await? {
        return Err(AppError::NotFound(format!("Dossier '{}'", id)));
    }
    info!(id = %id, "Dossier supprimé");
    Ok(Json(json!({ "message": format!("Dossier '{}' supprimé", id) })))
}
