//! Multinomial naive Bayes over word counts.
//!
//! Text is lower-cased and split into tokens of two or more word
//! characters. Tokens outside the training vocabulary are ignored, so text
//! with no known tokens is scored by the class priors alone.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{ClassifierError, Prediction, TextModel};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").unwrap_or_else(|_| unreachable!()));

/// Splits `text` into lower-case word tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Counts token occurrences in `text`.
#[must_use]
pub fn token_counts(text: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// A trained multinomial naive Bayes model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// Class labels.
    pub classes: Vec<String>,
    /// Log prior probability of each class.
    pub class_log_prior: Vec<f64>,
    /// Token -> log probability of the token under each class.
    pub feature_log_prob: BTreeMap<String, Vec<f64>>,
}

impl NaiveBayesModel {
    /// Reads and validates a model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes an inconsistent model.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let contents = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&contents)?;
        model.validate()?;
        Ok(model)
    }

    /// Writes the model to `path` as JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ClassifierError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Class labels in model order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Checks that every array has one finite entry per class.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has no classes, its arrays disagree
    /// in length, or any log probability is not finite.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let n = self.classes.len();
        if n == 0 {
            return Err(ClassifierError::EmptyModel);
        }
        if self.class_log_prior.len() != n {
            return Err(ClassifierError::Inconsistent {
                message: format!(
                    "{} class priors for {n} classes",
                    self.class_log_prior.len()
                ),
            });
        }
        if let Some((token, probs)) = self.feature_log_prob.iter().find(|(_, p)| p.len() != n) {
            return Err(ClassifierError::Inconsistent {
                message: format!("token '{token}' has {} probabilities for {n} classes", probs.len()),
            });
        }
        if self.class_log_prior.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::Inconsistent {
                message: "class priors must be finite".to_string(),
            });
        }
        if let Some((token, _)) = self
            .feature_log_prob
            .iter()
            .find(|(_, p)| p.iter().any(|v| !v.is_finite()))
        {
            return Err(ClassifierError::Inconsistent {
                message: format!("token '{token}' has non-finite probabilities"),
            });
        }
        Ok(())
    }

    /// Returns the posterior probability of each class for `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty or inconsistent.
    pub fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ClassifierError> {
        self.validate()?;

        let mut joint = self.class_log_prior.clone();
        for (token, count) in token_counts(text) {
            let Some(log_probs) = self.feature_log_prob.get(&token) else {
                continue;
            };
            for (score, log_prob) in joint.iter_mut().zip(log_probs) {
                *score += f64::from(count) * log_prob;
            }
        }

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let norm = max + joint.iter().map(|s| (s - max).exp()).sum::<f64>().ln();
        Ok(joint.iter().map(|s| (s - norm).exp()).collect())
    }
}

impl TextModel for NaiveBayesModel {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let probs = self.predict_proba(text)?;

        let (best, probability) = probs
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best });

        if !probability.is_finite() {
            return Err(ClassifierError::Inconsistent {
                message: "posterior probabilities are not finite".to_string(),
            });
        }

        Ok(Prediction {
            label: self.classes[best].clone(),
            probability,
        })
    }
}
