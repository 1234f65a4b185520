use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("profile_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("stored profile is not a JSON object")]
    NotAnObject,
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// The stored document exists but cannot be parsed or migrated.
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            StorageError::Serialization(_)
                | StorageError::UnsupportedVersion { .. }
                | StorageError::NotAnObject
        )
    }
}
