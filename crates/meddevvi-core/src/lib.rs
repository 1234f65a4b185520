//! meddevvi-core
//!
//! Pure domain types for Med-Dev-Vi: the patient case submitted through the
//! forms, the fixed resource vocabulary, and the facility profile a
//! peripheral centre declares. No I/O here; this is the shared vocabulary
//! of the engine, storage, and server crates.

pub mod error;
pub mod models;

/// Shown on every page and attached to every report.
pub const DISCLAIMER: &str =
    "This tool provides decision support only and does not replace clinical judgment.";
