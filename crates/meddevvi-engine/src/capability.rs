//! A facility's declared capabilities, as the reconciler sees them.

use std::collections::BTreeSet;

use meddevvi_core::models::facility::FacilityProfile;
use meddevvi_core::models::resource::Resource;

/// Namespace prefix keeping medication identifiers apart from equipment,
/// diagnostic, and competency identifiers.
pub const MEDICATION_PREFIX: &str = "med:";

/// Read-only snapshot of what a facility has on hand.
///
/// Built from a stored profile in production; tests and multi-facility
/// callers can collect one from any iterator of resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityCapabilitySet {
    resources: BTreeSet<Resource>,
    medications: BTreeSet<String>,
}

impl FacilityCapabilitySet {
    pub fn from_profile(profile: &FacilityProfile) -> Self {
        let mut set: Self = profile.available_resources().into_iter().collect();
        for med in profile.medications.iter().filter(|m| m.in_stock) {
            set.add_medication(&med.drug_name);
        }
        set
    }

    fn add_medication(&mut self, drug_name: &str) {
        let name = drug_name.trim().to_lowercase();
        if !name.is_empty() {
            self.medications.insert(name);
        }
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.resources.contains(&resource)
    }

    /// In-stock medications, trimmed and lowercased, in name order.
    pub fn medications(&self) -> impl Iterator<Item = &str> {
        self.medications.iter().map(String::as_str)
    }

    /// Every identifier in the set: resources by name, medications as
    /// `med:<name>`.
    pub fn identifiers(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|r| r.as_str().to_string())
            .chain(
                self.medications
                    .iter()
                    .map(|m| format!("{MEDICATION_PREFIX}{m}")),
            )
            .collect()
    }
}

impl FromIterator<Resource> for FacilityCapabilitySet {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
            medications: BTreeSet::new(),
        }
    }
}
