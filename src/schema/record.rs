// FICHIER : src/schema/record.rs

use super::compute;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Genre déclaré du patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "others" => Some(Gender::Others),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

/// Verdict de santé dérivé de l'IMC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Underweight => "Underweight",
            Verdict::Healthy => "Healthy",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        };
        write!(f, "{}", s)
    }
}

/// Dossier patient entièrement validé.
///
/// Immuable après construction : les champs sont privés, toute mise à
/// jour repasse par le validateur et produit une nouvelle instance.
/// `bmi` et `verdict` ne sont jamais stockés, ils sont recalculés à
/// chaque accès et injectés à la sérialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    id: String,
    name: String,
    city: Option<String>,
    age: i64,
    gender: Gender,
    height: f64,
    weight: f64,
    allergies: Option<Vec<String>>,
    contact_number: BTreeMap<String, String>,
    email: Option<String>,
}

impl PatientRecord {
    /// Constructeur réservé au validateur : les invariants doivent déjà
    /// avoir été vérifiés sur les valeurs fournies.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_validated(
        id: String,
        name: String,
        city: Option<String>,
        age: i64,
        gender: Gender,
        height: f64,
        weight: f64,
        allergies: Option<Vec<String>>,
        contact_number: BTreeMap<String, String>,
        email: Option<String>,
    ) -> Self {
        Self {
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
        }
    }

    // --- ACCESSEURS ---

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
    pub fn age(&self) -> i64 {
        self.age
    }
    pub fn gender(&self) -> Gender {
        self.gender
    }
    pub fn height(&self) -> f64 {
        self.height
    }
    pub fn weight(&self) -> f64 {
        self.weight
    }
    pub fn allergies(&self) -> Option<&[String]> {
        self.allergies.as_deref()
    }
    pub fn contact_number(&self) -> &BTreeMap<String, String> {
        &self.contact_number
    }
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    // --- CHAMPS DÉRIVÉS (jamais stockés) ---

    pub fn bmi(&self) -> f64 {
        compute::bmi(self.weight, self.height)
    }

    pub fn verdict(&self) -> Verdict {
        compute::classify(self.bmi())
    }

    // --- SÉRIALISATION ---

    /// Champs stockés uniquement (sans les dérivés). C'est cette forme
    /// qui part au magasin et qui sert de base au merge partiel.
    pub fn stored_fields(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(self.id));
        map.insert("name".to_string(), json!(self.name));
        if let Some(city) = &self.city {
            map.insert("city".to_string(), json!(city));
        }
        map.insert("age".to_string(), json!(self.age));
        map.insert("gender".to_string(), json!(self.gender));
        map.insert("height".to_string(), json!(self.height));
        map.insert("weight".to_string(), json!(self.weight));
        if let Some(allergies) = &self.allergies {
            map.insert("allergies".to_string(), json!(allergies));
        }
        map.insert("contact_number".to_string(), json!(self.contact_number));
        if let Some(email) = &self.email {
            map.insert("email".to_string(), json!(email));
        }
        map
    }

    pub fn to_stored_value(&self) -> Value {
        Value::Object(self.stored_fields())
    }
}

// Les dérivés sont calculés ICI, au moment de la sérialisation : ils ne
// peuvent jamais être périmés par rapport aux champs stockés.
impl Serialize for PatientRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let mut map = self.stored_fields();
        map.insert("bmi".to_string(), json!(self.bmi()));
        map.insert("verdict".to_string(), json!(self.verdict()));
        Value::Object(map).serialize(serializer)
    }
}
