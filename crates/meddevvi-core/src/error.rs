use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown analysis mode: {0}")]
    UnknownMode(String),

    #[error("unknown resource identifier: {0}")]
    UnknownResource(String),
}
