use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Row id of a mentor.
pub type MentorId = i64;

/// A stored mentor account, including its password digest.
///
/// The digest never leaves the process: it is skipped on serialization and
/// [`Mentor::profile`] is what gets returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: MentorId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub expertise: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Mentor {
    /// Public view of this mentor.
    #[must_use]
    pub fn profile(&self) -> MentorProfile {
        MentorProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            expertise: self.expertise.clone(),
        }
    }
}

/// Mentor identity as returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: MentorId,
    pub full_name: String,
    pub email: String,
    pub expertise: Option<String>,
}

/// Registration input. `password` is plaintext and is hashed before storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMentor {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub expertise: Option<String>,
}
