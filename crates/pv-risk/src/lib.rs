//! # pv-risk
//!
//! Dropout-risk scoring for Pravartak.
//!
//! Wraps a pre-trained classifier exported by the offline training process.
//! The only contract is `score([attendance, marks, backlog, gender_binary]) -> bool`;
//! the artifact format is described in [`artifact`].
//!
//! The artifact is loaded once at startup and shared read-only through an
//! `Arc`, so a [`RiskScorer`] can be cloned into every request handler
//! without locking.

pub mod artifact;
pub mod error;

use std::path::Path;
use std::sync::Arc;

pub use artifact::ScoringArtifact;
pub use error::ScorerError;
use pv_core::features::FeatureVector;

/// Process-wide handle on the (optional) loaded risk model.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    artifact: Option<Arc<ScoringArtifact>>,
}

impl RiskScorer {
    /// A scorer with no model. Every [`Self::score`] call fails with
    /// [`ScorerError::Unavailable`].
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { artifact: None }
    }

    #[must_use]
    pub fn from_artifact(artifact: ScoringArtifact) -> Self {
        Self {
            artifact: Some(Arc::new(artifact)),
        }
    }

    /// Load and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ScorerError` if the file cannot be read, parsed, or validated.
    pub fn try_load(path: &Path) -> Result<Self, ScorerError> {
        ScoringArtifact::from_path(path).map(Self::from_artifact)
    }

    /// Startup loader: a missing path or a broken artifact is logged and
    /// yields an unavailable scorer instead of aborting the process.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::warn!("no risk model configured; predictions are unavailable");
            return Self::unavailable();
        };

        match Self::try_load(path) {
            Ok(scorer) => {
                tracing::info!(
                    path = %path.display(),
                    trees = scorer.tree_count(),
                    "risk model loaded"
                );
                scorer
            }
            Err(error) => {
                tracing::error!(%error, path = %path.display(), "failed to load risk model");
                Self::unavailable()
            }
        }
    }

    /// True iff an artifact was loaded.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.artifact.is_some()
    }

    /// Number of trees in the loaded ensemble (0 when unavailable).
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.artifact
            .as_ref()
            .map_or(0, |artifact| artifact.booster.trees.len())
    }

    /// Dropout probability for `features`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Unavailable`] if no artifact is loaded.
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, ScorerError> {
        let artifact = self.artifact.as_ref().ok_or(ScorerError::Unavailable)?;
        Ok(artifact.probability(&features.to_array()))
    }

    /// Risk label for `features`. Deterministic for a given artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::Unavailable`] if no artifact is loaded.
    pub fn score(&self, features: &FeatureVector) -> Result<bool, ScorerError> {
        let artifact = self.artifact.as_ref().ok_or(ScorerError::Unavailable)?;
        let label = artifact.predict(&features.to_array());
        tracing::debug!(?features, label, "scored feature vector");
        Ok(label)
    }
}
