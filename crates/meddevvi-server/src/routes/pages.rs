use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};

use meddevvi_core::models::mode::AnalysisMode;
use meddevvi_core::models::patient::PatientCase;
use meddevvi_engine::compose::Report;

use crate::error::ApiError;
use crate::routes::analysis::run_triage;
use crate::routes::setup_form;
use crate::state::AppState;

pub const SETUP_PATH: &str = "/peripheral/setup";
pub const PERIPHERAL_PATH: &str = "/peripheral";

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.index()?))
}

pub async fn student_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.student(None, None)?))
}

pub async fn student_submit(
    State(state): State<AppState>,
    Form(case): Form<PatientCase>,
) -> Result<Html<String>, ApiError> {
    let Report::Student(report) = meddevvi_engine::analyze(&case, AnalysisMode::Student) else {
        return Err(ApiError::Internal("student analysis returned another mode".to_string()));
    };
    Ok(Html(state.pages.student(Some(&case), Some(&report))?))
}

pub async fn clinician_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.clinician(None, None)?))
}

pub async fn clinician_submit(
    State(state): State<AppState>,
    Form(case): Form<PatientCase>,
) -> Result<Html<String>, ApiError> {
    let Report::Clinician(report) = meddevvi_engine::analyze(&case, AnalysisMode::Clinician)
    else {
        return Err(ApiError::Internal("clinician analysis returned another mode".to_string()));
    };
    Ok(Html(state.pages.clinician(Some(&case), Some(&report))?))
}

pub async fn peripheral_page(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(profile) = state.store.load().await? else {
        return Ok(Redirect::to(SETUP_PATH).into_response());
    };
    Ok(Html(state.pages.peripheral(&profile, None, None)?).into_response())
}

pub async fn peripheral_submit(
    State(state): State<AppState>,
    Form(case): Form<PatientCase>,
) -> Result<Response, ApiError> {
    let Some(profile) = state.store.load().await? else {
        return Ok(Redirect::to(SETUP_PATH).into_response());
    };
    let result = run_triage(&profile, &case);
    Ok(Html(state.pages.peripheral(&profile, Some(&case), Some(&result))?).into_response())
}

/// Renders a blank form over an unreadable profile, which the next save replaces.
pub async fn setup_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let profile = match state.store.load().await {
        Ok(profile) => profile,
        Err(e) if e.is_unreadable() => {
            tracing::warn!(error = %e, "stored facility profile is unreadable");
            None
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Html(state.pages.setup(profile.as_ref())?))
}

pub async fn setup_submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let input = setup_form::profile_input(&fields);
    if input.name.is_empty() {
        return Err(ApiError::BadRequest("centre name is required".to_string()));
    }
    state.store.upsert(input).await?;
    Ok(Redirect::to(PERIPHERAL_PATH))
}

pub async fn update_page(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(profile) = state.store.load().await? else {
        return Ok(Redirect::to(SETUP_PATH).into_response());
    };
    Ok(Html(state.pages.setup(Some(&profile))?).into_response())
}
