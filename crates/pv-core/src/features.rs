//! The fixed feature vector consumed by the risk scorer.
//!
//! Order and encoding must match what the scoring artifact was trained on:
//! `[attendance, marks, backlog, gender_binary]`.

use serde::{Deserialize, Serialize};

/// Number of features in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 4;

/// Feature names in artifact order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["attendance", "marks", "backlog", "gender_binary"];

/// Encode a free-text gender as the binary feature: `1` for "male"
/// (case-insensitive), `0` for anything else.
#[must_use]
pub fn gender_binary(gender: &str) -> u8 {
    u8::from(gender.eq_ignore_ascii_case("male"))
}

/// `[attendance, marks, backlog, gender_binary]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub attendance: f64,
    pub marks: f64,
    pub backlog: u32,
    pub gender_binary: u8,
}

impl FeatureVector {
    #[must_use]
    pub fn new(attendance: f64, marks: f64, backlog: u32, gender: &str) -> Self {
        Self {
            attendance,
            marks,
            backlog,
            gender_binary: gender_binary(gender),
        }
    }

    /// Numeric form in artifact order.
    #[must_use]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.attendance,
            self.marks,
            f64::from(self.backlog),
            f64::from(self.gender_binary),
        ]
    }
}
