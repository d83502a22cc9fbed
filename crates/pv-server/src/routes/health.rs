use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pv_core::responses::HealthResponse;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: state.scorer.is_available(),
    })
}
