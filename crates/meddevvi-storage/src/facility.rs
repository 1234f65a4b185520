use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use meddevvi_core::models::facility::{FacilityProfile, FacilityProfileInput, PROFILE_VERSION};

use crate::error::StorageError;
use crate::migrate;

pub const PROFILE_FILE: &str = "facility.json";

/// File-backed store for the deployment's single facility profile.
///
/// Writes go to a temp file that is renamed over the profile, so a reader
/// sees either the previous profile or the new one in full. The lock keeps
/// an in-process upsert from interleaving with another.
#[derive(Debug)]
pub struct FacilityStore {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl FacilityStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Load the stored profile. `Ok(None)` if none has been set up yet.
    pub async fn load(&self) -> Result<Option<FacilityProfile>, StorageError> {
        let _guard = self.lock.read().await;
        self.read_profile().await
    }

    /// Create the profile, or update the existing one in place. A stored
    /// document that cannot be parsed or migrated is replaced.
    pub async fn upsert(
        &self,
        input: FacilityProfileInput,
    ) -> Result<FacilityProfile, StorageError> {
        let _guard = self.lock.write().await;
        let now = jiff::Timestamp::now();

        let stored = match self.read_profile().await {
            Ok(stored) => stored,
            Err(e) if e.is_unreadable() => {
                tracing::warn!(
                    path = %self.path().display(),
                    error = %e,
                    "unreadable facility profile will be replaced"
                );
                None
            }
            Err(e) => return Err(e),
        };

        let profile = match stored {
            Some(mut existing) => {
                existing.apply(input, now);
                existing
            }
            None => FacilityProfile::new(input, now),
        };

        self.write_profile(&profile).await?;
        Ok(profile)
    }

    async fn read_profile(&self) -> Result<Option<FacilityProfile>, StorageError> {
        let path = self.path();
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(&path, e)),
        };

        // Parse as raw JSON so migrations run before deserializing.
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let version = migrate::stored_version(&json)?;
        let migrated = migrate::migrate(json, version)?;
        let profile: FacilityProfile = serde_json::from_value(migrated)?;

        tracing::debug!(path = %path.display(), profile_id = %profile.id, "facility profile loaded");
        Ok(Some(profile))
    }

    async fn write_profile(&self, profile: &FacilityProfile) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?;

        // Always write the current version, regardless of what was loaded.
        let mut stamped = profile.clone();
        stamped.profile_version = PROFILE_VERSION;
        let json = serde_json::to_vec_pretty(&stamped)?;

        let path = self.path();
        let tmp_path = tmp_path(&path);
        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|e| StorageError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        tracing::info!(
            path = %path.display(),
            profile_id = %profile.id,
            medications = profile.medications.len(),
            "facility profile saved"
        );
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}
