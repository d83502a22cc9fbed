//! API error type and its HTTP mapping.
//!
//! Every failure body is `{"message": "..."}`. Store and scorer internals are
//! logged here and never sent to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pv_core::errors::CoreError;
use pv_core::responses::MessageResponse;
use pv_db::error::DatabaseError;
use pv_risk::ScorerError;
use thiserror::Error;

const GENERIC_FAILURE: &str = "Unable to process request";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, or out-of-range request input.
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("Risk model not available")]
    ScorerUnavailable,

    /// A store or scorer failure other than the above. The message is safe
    /// to show; the cause has already been logged.
    #[error("{0}")]
    Failed(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateEmail | Self::Failed(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ScorerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn student_not_found() -> Self {
        Self::NotFound("Student not found".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::DuplicateEmail => Self::DuplicateEmail,
            DatabaseError::InvalidCredentials => Self::InvalidCredentials,
            DatabaseError::NotFound { entity: "student", .. } => Self::student_not_found(),
            DatabaseError::NotFound { entity, .. } => Self::NotFound(format!("{entity} not found")),
            DatabaseError::Constraint(reason) => {
                tracing::warn!(%reason, "write rejected by constraint");
                Self::Failed(reason)
            }
            DatabaseError::Scoring(error) => error.into(),
            other => {
                tracing::error!(error = %other, "store operation failed");
                Self::Failed(GENERIC_FAILURE.into())
            }
        }
    }
}

impl From<ScorerError> for ApiError {
    fn from(error: ScorerError) -> Self {
        match error {
            ScorerError::Unavailable => Self::ScorerUnavailable,
            other => {
                tracing::error!(error = %other, "risk scoring failed");
                Self::Failed(GENERIC_FAILURE.into())
            }
        }
    }
}
