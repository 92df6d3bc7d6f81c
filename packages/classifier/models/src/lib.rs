#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Waste classification result type.

use serde::{Deserialize, Serialize};

/// Category reported when the text could not be classified.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Source reported for predictions made from the user's text.
pub const USER_DESCRIPTION_SOURCE: &str = "User Description";

/// Outcome of classifying a waste description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted category, or [`UNKNOWN_CATEGORY`].
    pub final_category: String,
    /// Confidence as a percentage in `[0, 100]`, rounded to two decimals.
    pub confidence: f64,
    /// Where the prediction came from.
    pub source: String,
}

impl Classification {
    /// The result used when no prediction could be made.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            final_category: UNKNOWN_CATEGORY.to_string(),
            confidence: 0.0,
            source: UNKNOWN_CATEGORY.to_string(),
        }
    }

    /// Whether this is the "could not classify" result.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.final_category == UNKNOWN_CATEGORY
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::unknown()
    }
}
