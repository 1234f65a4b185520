//! Forward migrations for stored facility profiles.
//!
//! Each step is a pure transform on the raw JSON value, applied before
//! deserializing into [`FacilityProfile`](meddevvi_core::models::facility::FacilityProfile).

use meddevvi_core::models::facility::PROFILE_VERSION;

use crate::error::StorageError;

/// Version recorded in a stored document. Missing = 0 (pre-versioned).
pub fn stored_version(json: &serde_json::Value) -> Result<u32, StorageError> {
    let Some(found) = json.get("profile_version").and_then(|v| v.as_u64()) else {
        return Ok(0);
    };
    u32::try_from(found).map_err(|_| StorageError::UnsupportedVersion {
        found,
        supported: PROFILE_VERSION,
    })
}

/// Run sequential migrations from `from_version` up to [`PROFILE_VERSION`].
pub fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, StorageError> {
    if from_version > PROFILE_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: from_version.into(),
            supported: PROFILE_VERSION,
        });
    }

    // v0 → v1: same shape, only the version stamp is missing.
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(StorageError::NotAnObject)?;
        obj.insert(
            "profile_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("stamped unversioned facility profile as v1");
    }

    Ok(json)
}
