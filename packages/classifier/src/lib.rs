#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Free-text waste classification.
//!
//! [`WasteClassifier`] wraps any [`TextModel`] and turns its predictions
//! into a [`Classification`]. It never fails: short input, a missing
//! model, or a prediction error all produce the `"Unknown"` result, which
//! callers use to stop before looking up a bin.
//!
//! The bundled model is a multinomial naive Bayes classifier
//! ([`naive_bayes::NaiveBayesModel`]) trained by [`train::train`] and
//! stored as JSON.

pub mod naive_bayes;
pub mod train;

use std::path::Path;

pub use ewaste_classifier_models::{Classification, UNKNOWN_CATEGORY, USER_DESCRIPTION_SOURCE};

/// Default location of the text model artifact, relative to the working
/// directory.
pub const DEFAULT_MODEL_PATH: &str = "data/models/text_classifier.json";

/// Inputs shorter than this many characters (after trimming) are not
/// classified.
pub const MIN_TEXT_CHARS: usize = 2;

/// Errors from loading, training, or running a text model.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The model has no classes.
    #[error("Model has no classes")]
    EmptyModel,

    /// The model's arrays disagree on the number of classes.
    #[error("Model is inconsistent: {message}")]
    Inconsistent {
        /// Description.
        message: String,
    },

    /// Training was attempted without any labelled examples.
    #[error("No labelled examples to train on")]
    EmptyTrainingSet,

    /// The smoothing parameter is not a positive finite number.
    #[error("Smoothing alpha must be positive and finite, got {alpha}")]
    InvalidAlpha {
        /// The rejected value.
        alpha: f64,
    },
}

/// A single prediction from a [`TextModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Most probable label.
    pub label: String,
    /// Probability of `label` in `[0, 1]`.
    pub probability: f64,
}

/// A trained text model.
pub trait TextModel: Send + Sync {
    /// Predicts the most probable label for `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot produce a prediction.
    fn predict(&self, text: &str) -> Result<Prediction, ClassifierError>;
}

/// Classification adapter around an optional [`TextModel`].
pub struct WasteClassifier {
    model: Option<Box<dyn TextModel>>,
}

impl WasteClassifier {
    /// Wraps a loaded model.
    #[must_use]
    pub fn new(model: impl TextModel + 'static) -> Self {
        Self {
            model: Some(Box::new(model)),
        }
    }

    /// A classifier with no model. Every input classifies as `"Unknown"`.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { model: None }
    }

    /// Loads a naive Bayes model from `path`, or returns an unavailable
    /// classifier if the file is missing or corrupt.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        log::info!("Loading text model from {}", path.display());

        if !path.exists() {
            log::warn!("Text model not found at {}", path.display());
            return Self::unavailable();
        }

        match naive_bayes::NaiveBayesModel::load(path) {
            Ok(model) => {
                log::info!("Loaded text model with {} classes", model.classes().len());
                Self::new(model)
            }
            Err(e) => {
                log::error!("Failed to load text model from {}: {e}", path.display());
                Self::unavailable()
            }
        }
    }

    /// Whether a model is loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Classifies a free-text waste description.
    #[must_use]
    pub fn classify(&self, text: &str) -> Classification {
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            log::warn!("Input too short to classify");
            return Classification::unknown();
        }

        let Some(model) = &self.model else {
            log::error!("Text model is missing");
            return Classification::unknown();
        };

        match model.predict(text) {
            Ok(prediction) => {
                let confidence = round_to_hundredths(prediction.probability * 100.0);
                log::info!("Text classified: {} ({confidence}%)", prediction.label);
                Classification {
                    final_category: prediction.label,
                    confidence,
                    source: USER_DESCRIPTION_SOURCE.to_string(),
                }
            }
            Err(e) => {
                log::error!("Text prediction failed: {e}");
                Classification::unknown()
            }
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
