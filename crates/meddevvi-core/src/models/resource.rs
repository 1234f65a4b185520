use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Which section of the facility profile declares a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResourceCategory {
    Infrastructure,
    Diagnostic,
    Competency,
}

/// The fixed vocabulary of equipment, diagnostics, and competencies a case
/// can require and a facility can declare.
///
/// Ordering follows the identifier string, so a `BTreeSet<Resource>`
/// iterates in lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Resource {
    // Infrastructure
    Oxygen,
    Suction,
    IvFluids,
    Nebulizer,
    PowerBackup,
    // Diagnostics
    BloodGlucose,
    Hemoglobin,
    UrineTest,
    MalariaTest,
    Ecg,
    Xray,
    Ultrasound,
    // Competencies
    StartIv,
    GiveIm,
    ManageAirway,
    Intubate,
    ManageShock,
    MonitorVitals,
}

impl Resource {
    pub const INFRASTRUCTURE: [Resource; 5] = [
        Resource::Oxygen,
        Resource::Suction,
        Resource::IvFluids,
        Resource::Nebulizer,
        Resource::PowerBackup,
    ];

    pub const DIAGNOSTICS: [Resource; 7] = [
        Resource::BloodGlucose,
        Resource::Hemoglobin,
        Resource::UrineTest,
        Resource::MalariaTest,
        Resource::Ecg,
        Resource::Xray,
        Resource::Ultrasound,
    ];

    pub const COMPETENCIES: [Resource; 6] = [
        Resource::StartIv,
        Resource::GiveIm,
        Resource::ManageAirway,
        Resource::Intubate,
        Resource::ManageShock,
        Resource::MonitorVitals,
    ];

    /// Every resource, grouped by category in profile order.
    pub fn all() -> impl Iterator<Item = Resource> {
        Self::INFRASTRUCTURE
            .into_iter()
            .chain(Self::DIAGNOSTICS)
            .chain(Self::COMPETENCIES)
    }

    /// Stable identifier, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Oxygen => "oxygen",
            Resource::Suction => "suction",
            Resource::IvFluids => "iv_fluids",
            Resource::Nebulizer => "nebulizer",
            Resource::PowerBackup => "power_backup",
            Resource::BloodGlucose => "blood_glucose",
            Resource::Hemoglobin => "hemoglobin",
            Resource::UrineTest => "urine_test",
            Resource::MalariaTest => "malaria_test",
            Resource::Ecg => "ecg",
            Resource::Xray => "xray",
            Resource::Ultrasound => "ultrasound",
            Resource::StartIv => "start_iv",
            Resource::GiveIm => "give_im",
            Resource::ManageAirway => "manage_airway",
            Resource::Intubate => "intubate",
            Resource::ManageShock => "manage_shock",
            Resource::MonitorVitals => "monitor_vitals",
        }
    }

    /// Human-readable label for forms and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Oxygen => "Oxygen",
            Resource::Suction => "Suction",
            Resource::IvFluids => "IV fluids",
            Resource::Nebulizer => "Nebulizer",
            Resource::PowerBackup => "Power backup",
            Resource::BloodGlucose => "Blood glucose",
            Resource::Hemoglobin => "Hemoglobin",
            Resource::UrineTest => "Urine test",
            Resource::MalariaTest => "Malaria test",
            Resource::Ecg => "ECG",
            Resource::Xray => "X-ray",
            Resource::Ultrasound => "Ultrasound",
            Resource::StartIv => "Start IV line",
            Resource::GiveIm => "Give IM injection",
            Resource::ManageAirway => "Manage airway",
            Resource::Intubate => "Intubate",
            Resource::ManageShock => "Manage shock",
            Resource::MonitorVitals => "Monitor vitals",
        }
    }

    pub fn category(&self) -> ResourceCategory {
        if Self::INFRASTRUCTURE.contains(self) {
            ResourceCategory::Infrastructure
        } else if Self::DIAGNOSTICS.contains(self) {
            ResourceCategory::Diagnostic
        } else {
            ResourceCategory::Competency
        }
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::all()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::UnknownResource(s.to_string()))
    }
}
