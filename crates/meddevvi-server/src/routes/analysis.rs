use axum::Json;
use axum::extract::{Path, State};

use meddevvi_core::models::facility::FacilityProfile;
use meddevvi_core::models::mode::AnalysisMode;
use meddevvi_core::models::patient::PatientCase;
use meddevvi_engine::capability::FacilityCapabilitySet;
use meddevvi_engine::compose::{Report, TriageResult};

use crate::error::ApiError;
use crate::state::AppState;

pub const NO_PROFILE: &str =
    "no facility profile configured; create one with PUT /api/facility or at /peripheral/setup";

pub async fn analyze_case(
    Path(mode): Path<String>,
    Json(case): Json<PatientCase>,
) -> Result<Json<Report>, ApiError> {
    let mode: AnalysisMode = mode.parse()?;
    Ok(Json(meddevvi_engine::analyze(&case, mode)))
}

pub async fn triage_case(
    State(state): State<AppState>,
    Json(case): Json<PatientCase>,
) -> Result<Json<TriageResult>, ApiError> {
    let profile = state
        .store
        .load()
        .await?
        .ok_or_else(|| ApiError::Conflict(NO_PROFILE.to_string()))?;

    Ok(Json(run_triage(&profile, &case)))
}

/// Triage against the stored profile and log the outcome, never the case text.
pub(crate) fn run_triage(profile: &FacilityProfile, case: &PatientCase) -> TriageResult {
    let capabilities = FacilityCapabilitySet::from_profile(profile);
    let result = meddevvi_engine::triage(case, &capabilities);

    tracing::info!(
        facility_id = %profile.id,
        capabilities = ?capabilities.identifiers(),
        risk = result.risk_level.as_str(),
        stabilization = ?result.stabilization_possible,
        refer_immediately = ?result.refer_immediately,
        missing = result.missing_resources.len(),
        "triage completed"
    );

    result
}
