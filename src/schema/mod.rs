// FICHIER : src/schema/mod.rs

//! Schéma du dossier patient : contraintes unitaires déclaratives,
//! contraintes croisées et champs dérivés (IMC, verdict).
//!
//! Le validateur est une fonction pure de ses entrées : aucun état,
//! aucune E/S, invocable en parallèle sans synchronisation.

pub mod compute;
mod issue;
pub mod record;
mod rules;
pub mod validator;

// Re-exports pour faciliter l'usage externe
pub use issue::{ValidationError, Violation, ViolationKind};
pub use record::{Gender, PatientRecord, Verdict};
pub use validator::{RecordValidator, SchemaVariant};
