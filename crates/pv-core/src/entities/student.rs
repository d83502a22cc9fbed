use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::MentorId;
use crate::features::FeatureVector;

/// Row id of a student.
pub type StudentId = i64;

/// A stored student record.
///
/// `dropout_risk` is computed once when the record is created and is never
/// recomputed on read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
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
    pub mentor_id: MentorId,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a student record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub roll_no: String,
    pub gender: String,
    pub category: String,
    pub fees_status: String,
    pub attendance: f64,
    pub marks: f64,
    pub backlog: u32,
    pub mentor_id: MentorId,
}

impl NewStudent {
    /// Feature vector fed to the risk scorer for this student.
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(self.attendance, self.marks, self.backlog, &self.gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_follow_field_values() {
        let student = NewStudent {
            full_name: "B".into(),
            email: "b@x.com".into(),
            roll_no: "1".into(),
            gender: "Male".into(),
            category: "Gen".into(),
            fees_status: "Paid".into(),
            attendance: 85.0,
            marks: 7.5,
            backlog: 0,
            mentor_id: 1,
        };
        assert_eq!(student.features().to_array(), [85.0, 7.5, 0.0, 1.0]);
    }
}
