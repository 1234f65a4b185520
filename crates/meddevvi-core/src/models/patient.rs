use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A patient case as submitted through the student, clinician, or
/// peripheral forms.
///
/// Vital signs are kept as the raw text the user typed. Nothing here is
/// guaranteed to be numeric; the engine degrades unparsable values to
/// "unknown" rather than rejecting the case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientCase {
    pub age: u32,
    pub sex: String,
    pub chief_complaint: String,
    pub symptom_duration: String,
    pub symptoms: String,
    pub temperature: String,
    pub pulse: String,
    /// Textual "SBP/DBP", e.g. "120/80".
    pub blood_pressure: String,
    pub respiratory_rate: String,
    pub oxygen_saturation: String,
    pub lab_values: String,
    #[serde(default)]
    pub comorbidities: String,
}
