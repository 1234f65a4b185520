//! meddevvi-storage
//!
//! Persistence for the facility profile. A single JSON document on local
//! disk, written atomically so readers only ever see a committed profile.

pub mod error;
pub mod facility;
pub mod migrate;
