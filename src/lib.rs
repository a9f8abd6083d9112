// FICHIER : src/lib.rs

//! Moteur de dossiers patients.
//!
//! - `schema` : validation déclarative des dossiers, champs dérivés
//!   (IMC, verdict) recalculés à chaque lecture, fusion partielle.
//! - `store` : base de données "fichier JSON plat", écritures atomiques.
//! - `server` : surface HTTP CRUD (axum).
//! - `utils` : erreurs, configuration, logs, E/S.

pub mod schema;
pub mod server;
pub mod store;
pub mod utils;
