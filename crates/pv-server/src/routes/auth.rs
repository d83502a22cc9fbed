//! `/api/auth/*`: mentor registration and login.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use pv_core::entities::MentorProfile;
use pv_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::requests::{LoginRequest, RegisterRequest};
use crate::state::AppState;

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .service
        .register_mentor(&request.into_new_mentor())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Registration successful")),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<MentorProfile>, ApiError> {
    let mentor = state
        .service
        .authenticate(request.email.trim(), &request.password)
        .await?;
    Ok(Json(mentor.profile()))
}
