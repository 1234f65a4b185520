use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::resource::{Resource, ResourceCategory};

/// Current profile schema version. Bump this when changing the stored shape;
/// each bump needs a matching step in the storage migration.
pub const PROFILE_VERSION: u32 = 1;

/// Physical infrastructure available at the facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Infrastructure {
    pub oxygen: bool,
    pub suction: bool,
    pub iv_fluids: bool,
    pub nebulizer: bool,
    pub power_backup: bool,
}

/// Point-of-care and imaging diagnostics available at the facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Diagnostics {
    pub blood_glucose: bool,
    pub hemoglobin: bool,
    pub urine_test: bool,
    pub malaria_test: bool,
    pub ecg: bool,
    pub xray: bool,
    pub ultrasound: bool,
}

/// Procedures the facility's staff are competent to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Competencies {
    pub start_iv: bool,
    pub give_im: bool,
    pub manage_airway: bool,
    pub intubate: bool,
    pub manage_shock: bool,
    pub monitor_vitals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medication {
    pub drug_name: String,
    #[serde(default)]
    pub in_stock: bool,
}

/// The editable part of a facility profile, as submitted by the setup form
/// or the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FacilityProfileInput {
    pub name: String,
    #[serde(default)]
    pub infrastructure: Infrastructure,
    #[serde(default)]
    pub diagnostics: Diagnostics,
    #[serde(default)]
    pub competencies: Competencies,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

/// A peripheral health centre's declared capabilities.
///
/// Only one profile exists per deployment; the engine itself accepts any
/// capability set built from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FacilityProfile {
    /// Schema version. Missing or 0 = pre-versioned profile.
    #[serde(default)]
    pub profile_version: u32,
    pub id: Uuid,
    pub name: String,
    pub infrastructure: Infrastructure,
    pub diagnostics: Diagnostics,
    pub competencies: Competencies,
    pub medications: Vec<Medication>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl FacilityProfile {
    pub fn new(input: FacilityProfileInput, now: jiff::Timestamp) -> Self {
        Self {
            profile_version: PROFILE_VERSION,
            id: Uuid::new_v4(),
            name: input.name,
            infrastructure: input.infrastructure,
            diagnostics: input.diagnostics,
            competencies: input.competencies,
            medications: input.medications,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field, keeping identity and creation time.
    /// The medication list is replaced wholesale.
    pub fn apply(&mut self, input: FacilityProfileInput, now: jiff::Timestamp) {
        self.name = input.name;
        self.infrastructure = input.infrastructure;
        self.diagnostics = input.diagnostics;
        self.competencies = input.competencies;
        self.medications = input.medications;
        self.updated_at = now;
    }

    pub fn has_resource(&self, resource: Resource) -> bool {
        match resource.category() {
            ResourceCategory::Infrastructure => self.infrastructure.has(resource),
            ResourceCategory::Diagnostic => self.diagnostics.has(resource),
            ResourceCategory::Competency => self.competencies.has(resource),
        }
    }

    /// Every declared resource, in profile order.
    pub fn available_resources(&self) -> Vec<Resource> {
        Resource::all().filter(|r| self.has_resource(*r)).collect()
    }
}

impl FacilityProfileInput {
    pub fn set_resource(&mut self, resource: Resource, available: bool) {
        match resource.category() {
            ResourceCategory::Infrastructure => self.infrastructure.set(resource, available),
            ResourceCategory::Diagnostic => self.diagnostics.set(resource, available),
            ResourceCategory::Competency => self.competencies.set(resource, available),
        }
    }
}

impl From<&FacilityProfile> for FacilityProfileInput {
    fn from(profile: &FacilityProfile) -> Self {
        Self {
            name: profile.name.clone(),
            infrastructure: profile.infrastructure,
            diagnostics: profile.diagnostics,
            competencies: profile.competencies,
            medications: profile.medications.clone(),
        }
    }
}

impl Infrastructure {
    fn slot(&mut self, resource: Resource) -> Option<&mut bool> {
        match resource {
            Resource::Oxygen => Some(&mut self.oxygen),
            Resource::Suction => Some(&mut self.suction),
            Resource::IvFluids => Some(&mut self.iv_fluids),
            Resource::Nebulizer => Some(&mut self.nebulizer),
            Resource::PowerBackup => Some(&mut self.power_backup),
            _ => None,
        }
    }

    pub fn has(&self, resource: Resource) -> bool {
        match resource {
            Resource::Oxygen => self.oxygen,
            Resource::Suction => self.suction,
            Resource::IvFluids => self.iv_fluids,
            Resource::Nebulizer => self.nebulizer,
            Resource::PowerBackup => self.power_backup,
            _ => false,
        }
    }

    pub fn set(&mut self, resource: Resource, available: bool) {
        if let Some(slot) = self.slot(resource) {
            *slot = available;
        }
    }
}

impl Diagnostics {
    fn slot(&mut self, resource: Resource) -> Option<&mut bool> {
        match resource {
            Resource::BloodGlucose => Some(&mut self.blood_glucose),
            Resource::Hemoglobin => Some(&mut self.hemoglobin),
            Resource::UrineTest => Some(&mut self.urine_test),
            Resource::MalariaTest => Some(&mut self.malaria_test),
            Resource::Ecg => Some(&mut self.ecg),
            Resource::Xray => Some(&mut self.xray),
            Resource::Ultrasound => Some(&mut self.ultrasound),
            _ => None,
        }
    }

    pub fn has(&self, resource: Resource) -> bool {
        match resource {
            Resource::BloodGlucose => self.blood_glucose,
            Resource::Hemoglobin => self.hemoglobin,
            Resource::UrineTest => self.urine_test,
            Resource::MalariaTest => self.malaria_test,
            Resource::Ecg => self.ecg,
            Resource::Xray => self.xray,
            Resource::Ultrasound => self.ultrasound,
            _ => false,
        }
    }

    pub fn set(&mut self, resource: Resource, available: bool) {
        if let Some(slot) = self.slot(resource) {
            *slot = available;
        }
    }
}

impl Competencies {
    fn slot(&mut self, resource: Resource) -> Option<&mut bool> {
        match resource {
            Resource::StartIv => Some(&mut self.start_iv),
            Resource::GiveIm => Some(&mut self.give_im),
            Resource::ManageAirway => Some(&mut self.manage_airway),
            Resource::Intubate => Some(&mut self.intubate),
            Resource::ManageShock => Some(&mut self.manage_shock),
            Resource::MonitorVitals => Some(&mut self.monitor_vitals),
            _ => None,
        }
    }

    pub fn has(&self, resource: Resource) -> bool {
        match resource {
            Resource::StartIv => self.start_iv,
            Resource::GiveIm => self.give_im,
            Resource::ManageAirway => self.manage_airway,
            Resource::Intubate => self.intubate,
            Resource::ManageShock => self.manage_shock,
            Resource::MonitorVitals => self.monitor_vitals,
            _ => false,
        }
    }

    pub fn set(&mut self, resource: Resource, available: bool) {
        if let Some(slot) = self.slot(resource) {
            *slot = available;
        }
    }
}

/// Pair up medication names with the stock checkboxes from the setup form.
///
/// Blank names are skipped. A name is in stock when its trimmed, lowercased
/// form appears among `stocked`.
pub fn parse_medications<N, S>(names: N, stocked: S) -> Vec<Medication>
where
    N: IntoIterator,
    N::Item: AsRef<str>,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    let stock: HashSet<String> = stocked
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect();

    names
        .into_iter()
        .filter_map(|name| {
            let clean = name.as_ref().trim();
            if clean.is_empty() {
                return None;
            }
            Some(Medication {
                drug_name: clean.to_string(),
                in_stock: stock.contains(&clean.to_lowercase()),
            })
        })
        .collect()
}
