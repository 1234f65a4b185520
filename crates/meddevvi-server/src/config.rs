use std::net::SocketAddr;
use std::path::PathBuf;

use eyre::WrapErr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding `facility.json`.
    pub data_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unset or blank variables take their
    /// defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind = var("MEDDEVVI_BIND", DEFAULT_BIND);
        let bind = bind
            .parse()
            .wrap_err_with(|| format!("MEDDEVVI_BIND is not a socket address: {bind}"))?;

        Ok(Self {
            bind,
            data_dir: PathBuf::from(var("MEDDEVVI_DATA_DIR", DEFAULT_DATA_DIR)),
        })
    }
}
