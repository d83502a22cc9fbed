//! Cross-cutting error types for Pravartak.
//!
//! Domain-specific errors (`DatabaseError`, `ScorerError`, `ConfigError`) are
//! defined in their respective crates. They converge into `ApiError` in
//! `pv-server`.

use thiserror::Error;

/// Errors raised while checking client input, before any store call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (missing or malformed field).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_keeps_the_message() {
        let CoreError::Validation(message) = CoreError::validation("email is required");
        assert_eq!(message, "email is required");
    }
}
