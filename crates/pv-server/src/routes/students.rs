//! `/api/students`: mentor-scoped student records.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pv_core::entities::StudentId;
use pv_core::responses::{StudentCreatedResponse, StudentResponse};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::requests::NewStudentRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Kept as text so a non-numeric value means "no such mentor", not a 400.
    mentor_id: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let Some(mentor_id) = query
        .mentor_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
    else {
        return Ok(Json(Vec::new()));
    };

    let students = state.service.list_students(mentor_id).await?;
    Ok(Json(students.iter().map(StudentResponse::from).collect()))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    id: Result<Path<StudentId>, PathRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::student_not_found());
    };
    let student = state.service.get_student(id).await?;
    Ok(Json(StudentResponse::from(&student)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<NewStudentRequest>,
) -> Result<(StatusCode, Json<StudentCreatedResponse>), ApiError> {
    let new = request.into_new_student()?;
    let student = state.service.add_student(&new, &state.scorer).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse::from(&student)),
    ))
}
