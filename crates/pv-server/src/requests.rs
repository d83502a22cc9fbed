//! Typed request bodies.
//!
//! Each body is checked by [`Validate::validate`] before any store call, so
//! handlers only ever see complete, in-range input.

use pv_core::entities::{MentorId, NewMentor, NewStudent};
use pv_core::errors::CoreError;
use pv_core::features::FeatureVector;
use serde::Deserialize;

pub trait Validate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    fn validate(&self) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub expertise: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("fullName", &self.full_name)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("expertise", &self.expertise)
    }
}

impl RegisterRequest {
    #[must_use]
    pub fn into_new_mentor(self) -> NewMentor {
        NewMentor {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            expertise: Some(self.expertise.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Blank values are not rejected here: they simply fail authentication, so
/// every bad login gets the same answer.
impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    pub full_name: String,
    pub email: String,
    pub roll_no: String,
    pub gender: String,
    pub category: String,
    pub fees_status: String,
    pub attendance: f64,
    pub marks: f64,
    pub backlog: i64,
    pub mentor_id: MentorId,
}

impl Validate for NewStudentRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("fullName", &self.full_name)?;
        require("email", &self.email)?;
        require("rollNo", &self.roll_no)?;
        require("gender", &self.gender)?;
        require("category", &self.category)?;
        require("feesStatus", &self.fees_status)?;
        finite("attendance", self.attendance)?;
        finite("marks", self.marks)?;
        backlog_count(self.backlog).map(drop)
    }
}

impl NewStudentRequest {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `backlog` does not fit a count.
    pub fn into_new_student(self) -> Result<NewStudent, CoreError> {
        Ok(NewStudent {
            backlog: backlog_count(self.backlog)?,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            roll_no: self.roll_no,
            gender: self.gender,
            category: self.category,
            fees_status: self.fees_status,
            attendance: self.attendance,
            marks: self.marks,
            mentor_id: self.mentor_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub attendance: f64,
    pub marks: f64,
    pub backlog: i64,
    pub gender: String,
}

impl Validate for PredictRequest {
    fn validate(&self) -> Result<(), CoreError> {
        finite("attendance", self.attendance)?;
        finite("marks", self.marks)?;
        backlog_count(self.backlog)?;
        require("gender", &self.gender)
    }
}

impl PredictRequest {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `backlog` does not fit a count.
    pub fn features(&self) -> Result<FeatureVector, CoreError> {
        Ok(FeatureVector::new(
            self.attendance,
            self.marks,
            backlog_count(self.backlog)?,
            &self.gender,
        ))
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::validation(format!("{field} must be a finite number")))
    }
}

fn backlog_count(value: i64) -> Result<u32, CoreError> {
    u32::try_from(value)
        .map_err(|_| CoreError::validation("backlog must be a non-negative whole number"))
}
