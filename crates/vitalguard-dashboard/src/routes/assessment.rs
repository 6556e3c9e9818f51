use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use vitalguard_core::models::vitals::VitalSigns;
use vitalguard_reasoning::backend::ChatBackend;

use crate::error::ApiError;
use crate::pipeline::{self, Assessment};
use crate::state::AppState;

/// Slider change: recompute labels and risk score.
pub async fn assess<B: ChatBackend + 'static>(
    State(state): State<AppState<B>>,
    payload: Result<Json<VitalSigns>, JsonRejection>,
) -> Result<Json<Assessment>, ApiError> {
    let Json(vitals) = payload?;
    Ok(Json(pipeline::assess(&state.scorer, vitals).await))
}
