//! Scoring artifact format and inference.
//!
//! The artifact mirrors the trained pipeline: a median imputer and a
//! standard scaler over the four features, followed by a binary-logistic
//! gradient-boosted tree ensemble. Trees are flat node lists rooted at
//! index 0; a split sends `x < threshold` to `yes` and everything else to `no`.

use std::path::Path;

use pv_core::features::{FEATURE_COUNT, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

use crate::error::ScorerError;

/// Artifact format understood by this crate.
pub const FORMAT_VERSION: u32 = 1;

const fn default_base_score() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringArtifact {
    pub format_version: u32,
    /// Feature names in input order. Must equal `FEATURE_NAMES`.
    pub features: Vec<String>,
    pub preprocessor: Preprocessor,
    pub booster: Booster,
}

/// Median imputation followed by standard scaling, one entry per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub medians: Vec<f64>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booster {
    /// Prior probability; its logit is the starting margin.
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        split: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

impl ScoringArtifact {
    /// Read and validate an artifact file.
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::Io` if the file cannot be read, `Parse` if it is
    /// not valid JSON for this format, or `InvalidArtifact` if validation fails.
    pub fn from_path(path: &Path) -> Result<Self, ScorerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScorerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate an artifact from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::Parse` or `ScorerError::InvalidArtifact`.
    pub fn from_json(text: &str) -> Result<Self, ScorerError> {
        let artifact: Self = serde_json::from_str(text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check everything inference relies on, so that [`Self::probability`]
    /// can index without bounds failures and every tree walk terminates.
    ///
    /// # Errors
    ///
    /// Returns `ScorerError::InvalidArtifact` describing the first problem found.
    pub fn validate(&self) -> Result<(), ScorerError> {
        if self.format_version != FORMAT_VERSION {
            return Err(invalid(format!(
                "unsupported format_version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.features != FEATURE_NAMES {
            return Err(invalid(format!(
                "features must be {FEATURE_NAMES:?}, got {:?}",
                self.features
            )));
        }
        self.preprocessor.validate()?;

        let base = self.booster.base_score;
        if !(base > 0.0 && base < 1.0) {
            return Err(invalid(format!("base_score must be in (0, 1), got {base}")));
        }
        if self.booster.trees.is_empty() {
            return Err(invalid("booster has no trees"));
        }
        for (index, tree) in self.booster.trees.iter().enumerate() {
            tree.validate()
                .map_err(|reason| invalid(format!("tree {index}: {reason}")))?;
        }
        Ok(())
    }

    /// Probability of dropout for an input in feature order.
    #[must_use]
    pub fn probability(&self, input: &[f64; FEATURE_COUNT]) -> f64 {
        let x = self.preprocessor.transform(input);
        let base = self.booster.base_score;
        let margin = (base / (1.0 - base)).ln()
            + self
                .booster
                .trees
                .iter()
                .map(|tree| tree.leaf_value(&x))
                .sum::<f64>();
        1.0 / (1.0 + (-margin).exp())
    }

    /// Binary label: `true` iff the probability is strictly above one half.
    #[must_use]
    pub fn predict(&self, input: &[f64; FEATURE_COUNT]) -> bool {
        self.probability(input) > 0.5
    }
}

impl Preprocessor {
    fn validate(&self) -> Result<(), ScorerError> {
        for (name, values) in [
            ("medians", &self.medians),
            ("means", &self.means),
            ("scales", &self.scales),
        ] {
            if values.len() != FEATURE_COUNT {
                return Err(invalid(format!(
                    "preprocessor.{name} has {} entries (expected {FEATURE_COUNT})",
                    values.len()
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(invalid(format!("preprocessor.{name} contains a non-finite value")));
            }
        }
        Ok(())
    }

    fn transform(&self, input: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in input.iter().enumerate() {
            let value = if value.is_finite() { *value } else { self.medians[i] };
            // Zero-variance features are left unscaled.
            let scale = if self.scales[i].abs() < f64::EPSILON {
                1.0
            } else {
                self.scales[i]
            };
            out[i] = (value - self.means[i]) / scale;
        }
        out
    }
}

impl Tree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".into());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    split,
                    threshold,
                    yes,
                    no,
                } => {
                    if split >= FEATURE_COUNT {
                        return Err(format!("node {index} splits on unknown feature {split}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [yes, no] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(format!("node {index} has a non-finite leaf"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Children always point forward, so this walk terminates.
    fn leaf_value(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { leaf } => return leaf,
                Node::Split {
                    split,
                    threshold,
                    yes,
                    no,
                } => index = if x[split] < threshold { yes } else { no },
            }
        }
    }
}

fn invalid(reason: impl Into<String>) -> ScorerError {
    ScorerError::InvalidArtifact(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FIXTURE: &str = include_str!("../fixtures/risk_model.json");

    fn fixture() -> ScoringArtifact {
        ScoringArtifact::from_json(FIXTURE).unwrap()
    }

    fn single_leaf_tree(leaf: f64) -> Tree {
        Tree {
            nodes: vec![Node::Leaf { leaf }],
        }
    }

    #[test]
    fn fixture_parses_splits_and_leaves() {
        let artifact = fixture();
        assert_eq!(artifact.booster.trees.len(), 2);
        assert!(matches!(
            artifact.booster.trees[0].nodes[0],
            Node::Split { split: 0, yes: 1, no: 2, .. }
        ));
        assert!(matches!(
            artifact.booster.trees[0].nodes[1],
            Node::Leaf { leaf } if (leaf - 0.6).abs() < 1e-12
        ));
    }

    #[rstest]
    #[case([40.0, 3.0, 3.0, 0.0], true)]
    #[case([85.0, 7.5, 0.0, 1.0], false)]
    #[case([50.0, 8.0, 0.0, 1.0], true)]
    #[case([90.0, 2.0, 4.0, 0.0], true)]
    fn predicts_expected_labels(#[case] input: [f64; FEATURE_COUNT], #[case] expected: bool) {
        assert_eq!(fixture().predict(&input), expected);
    }

    #[test]
    fn probability_of_exactly_one_half_is_low_risk() {
        // Leaves 0.4 and -0.4 cancel; base margin is logit(0.5) = 0.
        let artifact = fixture();
        let input = [85.0, 7.5, 3.0, 1.0];
        assert!((artifact.probability(&input) - 0.5).abs() < 1e-12);
        assert!(!artifact.predict(&input));
    }

    #[test]
    fn non_finite_input_is_imputed_with_median() {
        let artifact = fixture();
        let imputed = artifact.probability(&[f64::NAN, 7.5, 0.0, 1.0]);
        let explicit = artifact.probability(&[75.0, 7.5, 0.0, 1.0]);
        assert!((imputed - explicit).abs() < 1e-12);
    }

    #[test]
    fn zero_scale_does_not_divide_by_zero() {
        let mut artifact = fixture();
        artifact.preprocessor.scales[3] = 0.0;
        assert!(artifact.probability(&[85.0, 7.5, 0.0, 1.0]).is_finite());
    }

    #[test]
    fn base_score_shifts_margin() {
        let mut artifact = fixture();
        artifact.booster.trees = vec![single_leaf_tree(0.0)];
        artifact.booster.base_score = 0.8;
        assert!((artifact.probability(&[0.0; FEATURE_COUNT]) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn rejects_wrong_version() {
        let mut artifact = fixture();
        artifact.format_version = 2;
        let err = artifact.validate().unwrap_err();
        assert!(err.to_string().contains("format_version"), "{err}");
    }

    #[test]
    fn rejects_reordered_features() {
        let mut artifact = fixture();
        artifact.features.swap(0, 1);
        assert!(matches!(
            artifact.validate(),
            Err(ScorerError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn rejects_short_preprocessor_vectors() {
        let mut artifact = fixture();
        artifact.preprocessor.means.pop();
        let err = artifact.validate().unwrap_err();
        assert!(err.to_string().contains("preprocessor.means"), "{err}");
    }

    #[test]
    fn rejects_backward_child_pointer() {
        let mut artifact = fixture();
        artifact.booster.trees[1].nodes[0] = Node::Split {
            split: 1,
            threshold: 0.0,
            yes: 0,
            no: 2,
        };
        let err = artifact.validate().unwrap_err();
        assert!(err.to_string().contains("tree 1"), "{err}");
    }

    #[test]
    fn rejects_unknown_split_feature() {
        let mut artifact = fixture();
        artifact.booster.trees[1].nodes[0] = Node::Split {
            split: 4,
            threshold: 0.0,
            yes: 1,
            no: 2,
        };
        assert!(artifact.validate().is_err());
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(f64::NAN)]
    fn rejects_degenerate_base_score(#[case] base_score: f64) {
        let mut artifact = fixture();
        artifact.booster.base_score = base_score;
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn rejects_empty_ensemble() {
        let mut artifact = fixture();
        artifact.booster.trees.clear();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ScoringArtifact::from_json("{\"format_version\": 1"),
            Err(ScorerError::Parse(_))
        ));
    }
}
