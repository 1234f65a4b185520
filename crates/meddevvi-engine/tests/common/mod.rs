#![allow(dead_code)]

use meddevvi_core::models::patient::PatientCase;

/// A case with unremarkable vitals and no complaint text.
pub fn normal_case() -> PatientCase {
    PatientCase {
        age: 40,
        sex: "female".to_string(),
        chief_complaint: String::new(),
        symptom_duration: "1 day".to_string(),
        symptoms: String::new(),
        temperature: "37.0".to_string(),
        pulse: "80".to_string(),
        blood_pressure: "120/80".to_string(),
        respiratory_rate: "16".to_string(),
        oxygen_saturation: "98".to_string(),
        lab_values: String::new(),
        comorbidities: String::new(),
    }
}

pub fn septic_respiratory_case() -> PatientCase {
    PatientCase {
        temperature: "39.5".to_string(),
        blood_pressure: "80/50".to_string(),
        pulse: "130".to_string(),
        oxygen_saturation: "85".to_string(),
        respiratory_rate: "28".to_string(),
        symptoms: "cough and breathlessness".to_string(),
        ..normal_case()
    }
}
