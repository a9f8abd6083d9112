// FICHIER : src/schema/compute.rs

//! Champs dérivés du dossier : jamais stockés, recalculés à chaque
//! lecture/sérialisation pour rester cohérents avec les champs stockés.

use super::record::Verdict;

/// IMC = poids (kg) / taille (m)², arrondi à 2 décimales.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    round2(weight_kg / (height_m * height_m))
}

/// Classement de l'IMC en quatre verdicts (seuils 18.5 / 24.9 / 29.9).
pub fn classify(bmi: f64) -> Verdict {
    if bmi < 18.5 {
        Verdict::Underweight
    } else if bmi < 24.9 {
        Verdict::Healthy
    } else if bmi < 29.9 {
        Verdict::Overweight
    } else {
        Verdict::Obese
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
