//! Risk model artifact configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Path to the JSON scoring artifact. Empty means no model.
    #[serde(default)]
    pub path: String,
}

impl ModelConfig {
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    /// The artifact path, if one is configured.
    pub fn artifact_path(&self) -> Option<PathBuf> {
        self.is_configured().then(|| PathBuf::from(self.path.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_not_configured() {
        let config = ModelConfig::default();
        assert!(!config.is_configured());
        assert!(config.artifact_path().is_none());

        let config = ModelConfig { path: "   ".into() };
        assert!(config.artifact_path().is_none());
    }

    #[test]
    fn path_is_trimmed() {
        let config = ModelConfig {
            path: " model/risk_model.json ".into(),
        };
        assert_eq!(
            config.artifact_path(),
            Some(PathBuf::from("model/risk_model.json"))
        );
    }
}
