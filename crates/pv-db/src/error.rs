//! Database error types for pv-db.

use pv_risk::ScorerError;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A `UNIQUE` email constraint rejected the insert.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Entity lookup returned no row.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Any other constraint violation (foreign key, check).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Password hashing or digest parsing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// The risk scorer failed for a reason other than being unavailable.
    #[error(transparent)]
    Scoring(#[from] ScorerError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Classify a libSQL error raised by a write.
    ///
    /// Both unique columns in the schema are emails, so any `UNIQUE` failure is
    /// a duplicate email.
    #[must_use]
    pub fn from_write(error: libsql::Error) -> Self {
        let message = error.to_string();
        if message.contains("UNIQUE constraint failed") {
            Self::DuplicateEmail
        } else if message.contains("FOREIGN KEY constraint failed") {
            Self::Constraint("referenced mentor does not exist".into())
        } else if message.contains("CHECK constraint failed") {
            tracing::debug!(%message, "check constraint rejected write");
            Self::Constraint("a field value is out of range".into())
        } else {
            Self::LibSql(error)
        }
    }
}
