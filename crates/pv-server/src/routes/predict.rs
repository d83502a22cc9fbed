//! `/api/predict`: ad-hoc scoring without persistence.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pv_core::responses::PredictResponse;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::requests::PredictRequest;
use crate::state::AppState;

/// Model availability is checked before the body, so a missing model is
/// reported as 503 even for a malformed request.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<ValidJson<PredictRequest>, ApiError>,
) -> Result<Json<PredictResponse>, ApiError> {
    if !state.scorer.is_available() {
        return Err(ApiError::ScorerUnavailable);
    }
    let ValidJson(request) = body?;
    let features = request.features()?;
    let dropout_risk = state.scorer.score(&features)?;
    Ok(Json(PredictResponse::from_risk(dropout_risk)))
}
