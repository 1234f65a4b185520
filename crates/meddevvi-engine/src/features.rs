//! Feature extraction: raw vitals text and free-text fields in, a normalized
//! set of numeric vitals and boolean flags out.
//!
//! Nothing here fails. A vital that cannot be parsed becomes `None`, and every
//! threshold flag on a `None` vital is false.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use meddevvi_core::models::patient::PatientCase;

use crate::keywords;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(\.[0-9]+)?").expect("invalid number pattern"));

static BLOOD_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2,3})\s*/\s*([0-9]{2,3})").expect("invalid blood pressure pattern")
});

pub const FEVER_TEMP_C: f64 = 38.0;
pub const HYPOTENSION_SBP: u32 = 90;
pub const SEVERE_HYPOXIA_SPO2: f64 = 90.0;
pub const HYPOXIA_SPO2: f64 = 92.0;
pub const MARKED_TACHYCARDIA_BPM: f64 = 130.0;
pub const TACHYCARDIA_BPM: f64 = 110.0;
pub const TACHYPNEA_RR: f64 = 24.0;

/// Everything the rules need to know about a case, derived once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseFeatures {
    // Parsed vitals
    pub temperature: Option<f64>,
    pub pulse: Option<f64>,
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,

    // Symptom patterns
    pub respiratory: bool,
    pub gastrointestinal: bool,
    pub neurologic: bool,
    pub chest_pain: bool,
    pub urinary: bool,
    pub malaria: bool,
    pub edema: bool,
    pub glucose: bool,

    // Threshold flags
    pub fever: bool,
    pub hypotension: bool,
    pub severe_hypoxia: bool,
    /// SpO2 below 92 but not below 90.
    pub moderate_hypoxia: bool,
    pub marked_tachycardia: bool,
    /// Pulse of at least 110 but below 130.
    pub tachycardia: bool,
    pub tachypnea: bool,
}

impl CaseFeatures {
    /// SpO2 below 92, severe or not.
    pub fn any_hypoxia(&self) -> bool {
        self.severe_hypoxia || self.moderate_hypoxia
    }

    /// Pulse of at least 110, marked or not.
    pub fn any_tachycardia(&self) -> bool {
        self.marked_tachycardia || self.tachycardia
    }
}

/// First signed or unsigned decimal number in `value`, if any.
pub fn parse_number(value: &str) -> Option<f64> {
    NUMBER.find(value)?.as_str().parse::<f64>().ok()
}

/// First "SBP/DBP" pair in `value`, each side two or three digits.
pub fn parse_blood_pressure(value: &str) -> (Option<u32>, Option<u32>) {
    let Some(caps) = BLOOD_PRESSURE.captures(value) else {
        return (None, None);
    };
    let systolic = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let diastolic = caps.get(2).and_then(|m| m.as_str().parse().ok());
    match (systolic, diastolic) {
        (Some(s), Some(d)) => (Some(s), Some(d)),
        _ => (None, None),
    }
}

/// Free-text fields joined with single spaces and lowercased.
pub fn case_text(case: &PatientCase) -> String {
    [
        case.chief_complaint.as_str(),
        case.symptoms.as_str(),
        case.lab_values.as_str(),
        case.comorbidities.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn extract_features(case: &PatientCase) -> CaseFeatures {
    let text = case_text(case);

    let temperature = parse_number(&case.temperature);
    let pulse = parse_number(&case.pulse);
    let respiratory_rate = parse_number(&case.respiratory_rate);
    let oxygen_saturation = parse_number(&case.oxygen_saturation);
    let (systolic, diastolic) = parse_blood_pressure(&case.blood_pressure);

    let severe_hypoxia = oxygen_saturation.is_some_and(|s| s < SEVERE_HYPOXIA_SPO2);
    let marked_tachycardia = pulse.is_some_and(|p| p >= MARKED_TACHYCARDIA_BPM);

    CaseFeatures {
        temperature,
        pulse,
        systolic,
        diastolic,
        respiratory_rate,
        oxygen_saturation,

        respiratory: keywords::matches_any(&text, keywords::RESPIRATORY),
        gastrointestinal: keywords::matches_any(&text, keywords::GASTROINTESTINAL),
        neurologic: keywords::matches_any(&text, keywords::NEUROLOGIC),
        chest_pain: keywords::matches_any(&text, keywords::CHEST_PAIN),
        urinary: keywords::matches_any(&text, keywords::URINARY),
        malaria: keywords::matches_any(&text, keywords::MALARIA),
        edema: keywords::matches_any(&text, keywords::EDEMA),
        glucose: keywords::matches_any(&text, keywords::GLUCOSE),

        fever: temperature.is_some_and(|t| t >= FEVER_TEMP_C),
        hypotension: systolic.is_some_and(|s| s < HYPOTENSION_SBP),
        severe_hypoxia,
        moderate_hypoxia: !severe_hypoxia && oxygen_saturation.is_some_and(|s| s < HYPOXIA_SPO2),
        marked_tachycardia,
        tachycardia: !marked_tachycardia && pulse.is_some_and(|p| p >= TACHYCARDIA_BPM),
        tachypnea: respiratory_rate.is_some_and(|r| r >= TACHYPNEA_RR),
    }
}
