//! JSON response shapes returned by the HTTP API.
//!
//! Field names are camelCase on the wire. Failure bodies always use
//! [`MessageResponse`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{MentorId, Student, StudentId};

/// Body for messages and every error response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Student as returned on read paths.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: StudentId,
    pub full_name: String,
    pub email: String,
    pub roll_no: String,
    pub gender: String,
    pub category: String,
    pub fees_status: String,
    pub attendance: f64,
    pub marks: f64,
    pub backlog: u32,
    pub dropout_risk: bool,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            email: student.email.clone(),
            roll_no: student.roll_no.clone(),
            gender: student.gender.clone(),
            category: student.category.clone(),
            fees_status: student.fees_status.clone(),
            attendance: student.attendance,
            marks: student.marks,
            backlog: student.backlog,
            dropout_risk: student.dropout_risk,
        }
    }
}

/// Response from `POST /api/students`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreatedResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub mentor_id: MentorId,
    pub message: String,
}

impl From<&Student> for StudentCreatedResponse {
    fn from(student: &Student) -> Self {
        Self {
            student: student.into(),
            mentor_id: student.mentor_id,
            message: "Student added successfully".to_string(),
        }
    }
}

/// Response from `POST /api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub dropout_risk: bool,
    pub message: String,
}

impl PredictResponse {
    #[must_use]
    pub fn from_risk(dropout_risk: bool) -> Self {
        let message = if dropout_risk {
            "High risk of dropout"
        } else {
            "Low risk of dropout"
        };
        Self {
            dropout_risk,
            message: message.to_string(),
        }
    }
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}
