// FICHIER : src/utils/error.rs

use serde::Serialize;
use std::io;

use crate::schema::ValidationError;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité de l'application finale) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

// --- GESTION D'ERREUR STRICTE ---

/// Type de résultat standard pour l'application.
/// Utilise notre AppError unifiée au lieu d'une erreur générique.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
/// Elle dérive `thiserror::Error` pour faciliter la conversion automatique.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur de stockage : {0}")]
    Storage(String),

    /// Défaut d'entrée signalé par le validateur : jamais transitoire,
    /// la seule issue est de corriger le dossier et de soumettre à nouveau.
    #[error("Dossier invalide : {0}")]
    Validation(#[from] ValidationError),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Conflit : {0}")]
    Conflict(String),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),
}

// Implémentation manuelle de Serialize pour renvoyer l'erreur au client
// sous forme de simple chaîne de caractères.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Helpers pour convertir des erreurs string en AppError
// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
