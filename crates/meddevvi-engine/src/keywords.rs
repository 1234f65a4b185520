//! Fixed keyword lists for symptom-pattern detection.
//!
//! Matching is plain substring membership against the lowercased case text.
//! "chest" alone counts as respiratory; the lists are kept exactly as they
//! are because changing them silently changes clinical output.

pub const RESPIRATORY: &[&str] = &["cough", "breath", "dyspnea", "wheeze", "chest"];

pub const GASTROINTESTINAL: &[&str] = &["vomit", "diarrhea", "diarrhoea", "abdominal", "dehydration"];

pub const NEUROLOGIC: &[&str] = &["confus", "seizure", "unconscious", "stroke", "weakness"];

pub const CHEST_PAIN: &[&str] = &["chest pain", "tightness", "pressure chest"];

pub const URINARY: &[&str] = &["dysuria", "urine", "flank"];

pub const MALARIA: &[&str] = &["chills", "rigors", "malaria"];

pub const EDEMA: &[&str] = &["edema", "oedema", "swelling", "swollen"];

pub const GLUCOSE: &[&str] = &["glucose", "sugar", "diabet", "dka"];

/// True if any keyword occurs in `text`. `text` must already be lowercase.
pub fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|word| text.contains(word))
}
