// FICHIER : src/schema/rules.rs

//! Table déclarative des contraintes par champ.
//!
//! Chaque règle est un prédicat indépendant appliqué à la valeur brute ;
//! le validateur les évalue TOUTES et agrège les violations, sans
//! court-circuit sur le premier échec.

use super::issue::{Violation, ViolationKind};
use super::record::Gender;
use super::validator::SchemaVariant;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub(crate) const NAME_MAX_LEN: usize = 50;
pub(crate) const ALLERGIES_MAX_LEN: usize = 5;
pub(crate) const AGE_MIN_EXCLUSIVE: i64 = 0;
pub(crate) const AGE_MAX_EXCLUSIVE: i64 = 120;

/// Prédicat unitaire : `None` si la valeur est conforme.
pub(crate) type FieldCheck = fn(&str, &Value) -> Option<Violation>;

pub(crate) struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub check: FieldCheck,
}

/// La liste des règles du schéma, selon la variante en vigueur.
pub(crate) fn field_rules(variant: SchemaVariant) -> Vec<FieldRule> {
    let mut rules = vec![
        FieldRule {
            field: "id",
            required: true,
            check: check_non_empty_string,
        },
        FieldRule {
            field: "name",
            required: true,
            check: check_name,
        },
        FieldRule {
            field: "city",
            required: false,
            check: check_string,
        },
        FieldRule {
            field: "age",
            required: true,
            check: check_age,
        },
        FieldRule {
            field: "gender",
            required: true,
            check: check_gender,
        },
        FieldRule {
            field: "height",
            required: true,
            check: check_strict_positive_float,
        },
        FieldRule {
            field: "weight",
            required: true,
            check: check_strict_positive_float,
        },
        FieldRule {
            field: "allergies",
            required: false,
            check: check_allergies,
        },
        FieldRule {
            field: "contact_number",
            required: true,
            check: check_contact_number,
        },
    ];

    if variant == SchemaVariant::Email {
        rules.push(FieldRule {
            field: "email",
            required: true,
            check: check_email,
        });
    }

    rules
}

// --- PRÉDICATS ---

fn check_string(field: &str, value: &Value) -> Option<Violation> {
    if !value.is_string() {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Chaîne de caractères attendue",
        ));
    }
    None
}

fn check_non_empty_string(field: &str, value: &Value) -> Option<Violation> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Chaîne de caractères attendue",
            ))
        }
    };
    if s.trim().is_empty() {
        return Some(Violation::new(
            ViolationKind::LengthViolation,
            field,
            "Ne doit pas être vide",
        ));
    }
    None
}

fn check_name(field: &str, value: &Value) -> Option<Violation> {
    if let Some(v) = check_non_empty_string(field, value) {
        return Some(v);
    }
    let s = value.as_str()?;
    if s.chars().count() > NAME_MAX_LEN {
        return Some(Violation::new(
            ViolationKind::LengthViolation,
            field,
            format!("Longueur maximale dépassée ({} caractères)", NAME_MAX_LEN),
        ));
    }
    None
}

fn check_age(field: &str, value: &Value) -> Option<Violation> {
    // Un âge fourni en décimal (65.0) est un défaut de type, pas de borne.
    let age = match value.as_i64() {
        Some(n) if value.is_i64() || value.is_u64() => n,
        _ => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Entier attendu",
            ))
        }
    };
    if age <= AGE_MIN_EXCLUSIVE || age >= AGE_MAX_EXCLUSIVE {
        return Some(Violation::new(
            ViolationKind::RangeViolation,
            field,
            format!(
                "Doit être strictement compris entre {} et {}",
                AGE_MIN_EXCLUSIVE, AGE_MAX_EXCLUSIVE
            ),
        ));
    }
    None
}

fn check_gender(field: &str, value: &Value) -> Option<Violation> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Chaîne de caractères attendue",
            ))
        }
    };
    if Gender::parse(s).is_none() {
        return Some(Violation::new(
            ViolationKind::EnumViolation,
            field,
            "Valeurs autorisées : male, female, others",
        ));
    }
    None
}

/// Float STRICT : un nombre entier (70) est refusé là où un décimal
/// (70.0) est exigé. Aucune coercion implicite int -> float.
fn check_strict_positive_float(field: &str, value: &Value) -> Option<Violation> {
    if !value.is_number() {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Nombre décimal attendu",
        ));
    }
    if !value.is_f64() {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Nombre décimal strict attendu (ex: 1.75), entier refusé",
        ));
    }
    let n = value.as_f64()?;
    if n <= 0.0 {
        return Some(Violation::new(
            ViolationKind::RangeViolation,
            field,
            "Doit être strictement positif",
        ));
    }
    None
}

fn check_allergies(field: &str, value: &Value) -> Option<Violation> {
    let arr = match value.as_array() {
        Some(a) => a,
        None => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Liste de chaînes attendue",
            ))
        }
    };
    if arr.iter().any(|v| !v.is_string()) {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Chaque allergie doit être une chaîne de caractères",
        ));
    }
    if arr.len() > ALLERGIES_MAX_LEN {
        return Some(Violation::new(
            ViolationKind::LengthViolation,
            field,
            format!("Au plus {} entrées", ALLERGIES_MAX_LEN),
        ));
    }
    None
}

fn check_contact_number(field: &str, value: &Value) -> Option<Violation> {
    let obj = match value.as_object() {
        Some(o) => o,
        None => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Table libellé -> numéro attendue",
            ))
        }
    };
    if obj.values().any(|v| !v.is_string()) {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Chaque contact doit être une chaîne de caractères",
        ));
    }
    None
}

fn check_email(field: &str, value: &Value) -> Option<Violation> {
    let s = match value.as_str() {
        Some(s) => s,
        None => {
            return Some(Violation::new(
                ViolationKind::TypeMismatch,
                field,
                "Chaîne de caractères attendue",
            ))
        }
    };
    if !email_regex().is_match(s) {
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            field,
            "Format d'adresse e-mail invalide",
        ));
    }
    None
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Forme minimale : local@domaine.tld (la liste blanche des
        // domaines est une contrainte croisée, vérifiée plus tard)
        Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("regex e-mail invalide")
    })
}
