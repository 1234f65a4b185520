use axum::Json;
use axum::extract::State;

use meddevvi_core::models::facility::{FacilityProfile, FacilityProfileInput};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_facility(
    State(state): State<AppState>,
) -> Result<Json<FacilityProfile>, ApiError> {
    let profile = state
        .store
        .load()
        .await?
        .ok_or_else(|| ApiError::NotFound("no facility profile configured".to_string()))?;
    Ok(Json(profile))
}

pub async fn put_facility(
    State(state): State<AppState>,
    Json(input): Json<FacilityProfileInput>,
) -> Result<Json<FacilityProfile>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("facility name is required".to_string()));
    }
    let profile = state.store.upsert(input).await?;
    Ok(Json(profile))
}
