//! Decoding of the facility setup form.
//!
//! The form posts one field per ticked checkbox, named after the resource,
//! plus repeated `medication_names` and `medication_stock` fields. Unticked
//! checkboxes are simply absent.

use meddevvi_core::models::facility::{FacilityProfileInput, parse_medications};
use meddevvi_core::models::resource::Resource;

pub const NAME_FIELD: &str = "centre_name";
pub const MEDICATION_NAMES_FIELD: &str = "medication_names";
pub const MEDICATION_STOCK_FIELD: &str = "medication_stock";

pub fn profile_input(fields: &[(String, String)]) -> FacilityProfileInput {
    let mut input = FacilityProfileInput::default();
    let mut names = Vec::new();
    let mut stocked = Vec::new();

    for (key, value) in fields {
        match key.as_str() {
            NAME_FIELD => input.name = value.trim().to_string(),
            MEDICATION_NAMES_FIELD => names.push(value.as_str()),
            MEDICATION_STOCK_FIELD => stocked.push(value.as_str()),
            other => {
                if let Ok(resource) = other.parse::<Resource>() {
                    input.set_resource(resource, true);
                }
            }
        }
    }

    input.medications = parse_medications(names, stocked);
    input
}
