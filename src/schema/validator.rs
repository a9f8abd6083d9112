// FICHIER : src/schema/validator.rs

//! Construction d'un dossier entièrement validé à partir des valeurs
//! brutes, ou échec déterministe listant chaque contrainte violée.

use super::issue::{ValidationError, Violation, ViolationKind};
use super::record::{Gender, PatientRecord};
use super::rules::field_rules;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Domaines d'e-mail acceptés (liste blanche).
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["hdfc.com", "icic.com"];

/// Clé du contact d'urgence, exigée à partir de cet âge.
pub const EMERGENCY_CONTACT_KEY: &str = "emergency";
pub const EMERGENCY_AGE_THRESHOLD: i64 = 60;

/// Variante du schéma en vigueur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Variante CRUD : pas de champ e-mail.
    Contact,
    /// Variante alternative : e-mail obligatoire, domaine en liste blanche.
    Email,
}

/// Le validateur : une fonction pure de ses entrées, sans état ni E/S.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    variant: SchemaVariant,
}

impl RecordValidator {
    pub fn new(variant: SchemaVariant) -> Self {
        Self { variant }
    }

    pub fn standard() -> Self {
        Self::new(SchemaVariant::Contact)
    }

    pub fn with_email() -> Self {
        Self::new(SchemaVariant::Email)
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Valide un dossier complet.
    ///
    /// Les contraintes unitaires sont TOUTES évaluées (pas d'arrêt au
    /// premier échec) ; les contraintes croisées ne sont examinées que si
    /// chaque champ est individuellement conforme. Les clés inconnues de
    /// l'entrée sont ignorées.
    pub fn validate(&self, raw: &Value) -> Result<PatientRecord, ValidationError> {
        let obj = match raw.as_object() {
            Some(o) => o,
            None => {
                return Err(ValidationError::single(
                    ViolationKind::TypeMismatch,
                    "dossier",
                    "Objet JSON attendu",
                ))
            }
        };

        // --- PASSE 1 : contraintes unitaires, agrégées ---
        let mut violations = Vec::new();
        for rule in field_rules(self.variant) {
            match obj.get(rule.field) {
                None => {
                    if rule.required {
                        violations.push(Violation::new(
                            ViolationKind::MissingField,
                            rule.field,
                            "Champ obligatoire manquant",
                        ));
                    }
                }
                // null explicite : interdit sur un champ obligatoire,
                // équivalent à "non renseigné" sur un champ optionnel
                Some(Value::Null) => {
                    if rule.required {
                        violations.push(Violation::new(
                            ViolationKind::TypeMismatch,
                            rule.field,
                            "null interdit pour un champ obligatoire",
                        ));
                    }
                }
                Some(value) => {
                    if let Some(violation) = (rule.check)(rule.field, value) {
                        violations.push(violation);
                    }
                }
            }
        }
        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        // --- PASSE 2 : contraintes croisées, sur les valeurs typées ---
        let record = self.build_record(obj);

        if record.age() >= EMERGENCY_AGE_THRESHOLD
            && !record.contact_number().contains_key(EMERGENCY_CONTACT_KEY)
        {
            violations.push(Violation::new(
                ViolationKind::CrossFieldViolation,
                "contact_number",
                format!(
                    "Contact '{}' requis à partir de {} ans",
                    EMERGENCY_CONTACT_KEY, EMERGENCY_AGE_THRESHOLD
                ),
            ));
        }

        if let Some(email) = record.email() {
            let domain = email.rsplit('@').next().unwrap_or_default();
            if !ALLOWED_EMAIL_DOMAINS.contains(&domain) {
                violations.push(Violation::new(
                    ViolationKind::CrossFieldViolation,
                    "email",
                    format!(
                        "Domaine '{}' hors liste blanche ({})",
                        domain,
                        ALLOWED_EMAIL_DOMAINS.join(", ")
                    ),
                ));
            }
        }

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }
        Ok(record)
    }

    /// Fusion partielle : seules les clés réellement fournies écrasent
    /// les champs existants (clé absente => champ intouché), l'identité
    /// `id` ne change jamais, puis le chemin complet de `validate`
    /// s'applique au résultat. Un dossier fusionné n'est jamais moins
    /// validé qu'un dossier créé.
    pub fn merge_update(
        &self,
        existing: &PatientRecord,
        partial: &Value,
    ) -> Result<PatientRecord, ValidationError> {
        let changes = match partial.as_object() {
            Some(o) => o,
            None => {
                return Err(ValidationError::single(
                    ViolationKind::TypeMismatch,
                    "dossier",
                    "Objet JSON attendu",
                ))
            }
        };

        let mut merged = existing.stored_fields();
        for (key, value) in changes {
            // L'identité est immuable, même si l'appelant tente de la fournir
            if key == "id" {
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }
        merged.insert("id".to_string(), Value::String(existing.id().to_string()));

        self.validate(&Value::Object(merged))
    }

    /// Construit le dossier typé. N'est appelé qu'après la passe
    /// unitaire : chaque extraction est garantie par les règles.
    fn build_record(&self, obj: &Map<String, Value>) -> PatientRecord {
        let get_str = |field: &str| -> String {
            obj.get(field)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let id = get_str("id");
        // Normalisation : le nom est toujours stocké en majuscules
        let name = get_str("name").to_uppercase();
        let city = obj
            .get("city")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let age = obj.get("age").and_then(|v| v.as_i64()).unwrap_or_default();
        let gender = obj
            .get("gender")
            .and_then(|v| v.as_str())
            .and_then(Gender::parse)
            .unwrap_or(Gender::Others);
        let height = obj
            .get("height")
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        let weight = obj
            .get("weight")
            .and_then(|v| v.as_f64())
            .unwrap_or_default();

        let allergies = obj.get("allergies").and_then(|v| v.as_array()).map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        });

        let contact_number: BTreeMap<String, String> = obj
            .get("contact_number")
            .and_then(|v| v.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let email = match self.variant {
            SchemaVariant::Email => obj
                .get("email")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            // Variante Contact : le champ n'appartient pas au schéma
            SchemaVariant::Contact => None,
        };

        PatientRecord::from_validated(
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
            allergies,
            contact_number,
            email,
        )
    }
}
