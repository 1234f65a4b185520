use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Which audience a clinical analysis is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnalysisMode {
    Student,
    Clinician,
    PeripheralSummary,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Student => "student",
            AnalysisMode::Clinician => "clinician",
            AnalysisMode::PeripheralSummary => "peripheral_summary",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(AnalysisMode::Student),
            "clinician" => Ok(AnalysisMode::Clinician),
            "peripheral" | "peripheral_summary" | "peripheral-summary" => {
                Ok(AnalysisMode::PeripheralSummary)
            }
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}
