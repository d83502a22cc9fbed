//! Risk scorer error types.

use std::path::PathBuf;

/// Errors that can occur while loading or calling the risk model.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    /// No artifact was loaded at startup.
    #[error("Risk model not available")]
    Unavailable,

    /// The artifact file could not be read.
    #[error("Failed to read risk model at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for the expected format.
    #[error("Failed to parse risk model: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but is structurally unusable.
    #[error("Invalid risk model: {0}")]
    InvalidArtifact(String),
}
