#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the e-waste recommender server.
//!
//! These types are serialized to JSON for the REST API. The
//! classification and recommendation payloads are embedded unchanged from
//! their own crates so the wire shape matches what the client expects.

use ewaste_bins_models::{DEFAULT_LOCATION, Recommendation};
use ewaste_classifier_models::Classification;
use serde::{Deserialize, Serialize};

/// Message returned by `POST /analyze` when the description is blank.
pub const EMPTY_TEXT_MESSAGE: &str = "Please provide a description.";

/// Message returned by `POST /analyze` when the text is not classifiable.
pub const UNIDENTIFIED_MESSAGE: &str = "Could not identify waste. Try a more specific description \
     (e.g., 'swollen battery', 'broken screen').";

/// Form fields accepted by `POST /analyze`.
///
/// Coordinates default to central Delhi when the client has no GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeForm {
    /// Free-text waste description.
    pub text: String,
    /// User latitude in decimal degrees.
    #[serde(default = "default_lat")]
    pub lat: f64,
    /// User longitude in decimal degrees.
    #[serde(default = "default_lng")]
    pub lng: f64,
}

const fn default_lat() -> f64 {
    DEFAULT_LOCATION.lat
}

const fn default_lng() -> f64 {
    DEFAULT_LOCATION.lng
}

/// Response body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalyzeResponse {
    /// The text was classified and a bin lookup was performed.
    Success {
        /// Classification of the description.
        classification: Classification,
        /// Nearest-bin lookup outcome.
        recommendation: Recommendation,
    },
    /// The request could not be analyzed.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

impl AnalyzeResponse {
    /// Builds an error response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Response body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHome {
    /// Greeting.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of categories with an indexed set of bins.
    pub categories: usize,
    /// Whether a text model is loaded.
    pub classifier_loaded: bool,
}
