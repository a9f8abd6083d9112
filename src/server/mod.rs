// FICHIER : src/server/mod.rs

//! Couche transport : routage axum + traduction des erreurs en réponses.
//!
//! Les échecs de validation sont des défauts d'entrée (422, liste des
//! violations exploitable en machine), jamais des fautes serveur.

pub mod handlers;

use crate::schema::RecordValidator;
use crate::store::PatientStore;
use crate::utils::prelude::*;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// État partagé entre tous les handlers.
pub struct ApiState {
    pub store: PatientStore,
    pub validator: RecordValidator,
}

pub type SharedState = Arc<ApiState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/view", get(handlers::view_patients))
        .route("/patient/{id}", get(handlers::get_patient))
        .route("/create", post(handlers::create_patient))
        .route("/edit/{id}", put(handlers::edit_patient))
        .route("/delete/{id}", delete(handlers::delete_patient))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "violations": e.violations,
                }),
            ),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string() }),
            ),
            AppError::Conflict(_) => (
                StatusCode::CONFLICT,
                json!({ "error": self.to_string() }),
            ),
            _ => {
                // Faute serveur : on trace le détail, le client n'en voit rien
                error!(erreur = %self, "Erreur interne");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Erreur interne" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
