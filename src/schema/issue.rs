// FICHIER : src/schema/issue.rs

use serde::{Deserialize, Serialize};

/// Catégorie d'une violation de contrainte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Champ obligatoire absent de l'entrée.
    MissingField,
    /// Valeur présente mais du mauvais type (ex: entier là où un float strict est exigé).
    TypeMismatch,
    /// Valeur numérique hors de ses bornes.
    RangeViolation,
    /// Chaîne ou séquence dépassant sa taille maximale.
    LengthViolation,
    /// Valeur hors de son ensemble autorisé.
    EnumViolation,
    /// Règle portant sur plusieurs champs à la fois.
    CrossFieldViolation,
}

/// Représente une contrainte violée : catégorie + champ + raison lisible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Échec de validation : la liste COMPLÈTE des violations, jamais un
/// dossier partiel. Toutes les contraintes unitaires sont évaluées avant
/// de renvoyer, pour que l'appelant puisse tout signaler d'un coup.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{} contrainte(s) violée(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(
        kind: ViolationKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violations: vec![Violation::new(kind, field, message)],
        }
    }

    /// Au moins une violation de cette catégorie ?
    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Au moins une violation sur ce champ ?
    pub fn touches(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}
