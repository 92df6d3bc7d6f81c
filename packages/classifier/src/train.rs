//! Naive Bayes training from labelled descriptions.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::ClassifierError;
use crate::naive_bayes::{NaiveBayesModel, token_counts};

/// Additive (Laplace) smoothing applied to token counts.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// A waste description with its category label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabeledText {
    /// Free-text description.
    pub text: String,
    /// Category label.
    pub label: String,
}

/// Reads labelled examples from a CSV file with `text,label` columns.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row is malformed.
pub fn read_labeled_csv(path: &Path) -> Result<Vec<LabeledText>, ClassifierError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut examples = Vec::new();
    for row in reader.deserialize() {
        let example: LabeledText = row?;
        examples.push(example);
    }

    log::info!(
        "Read {} labelled examples from {}",
        examples.len(),
        path.display()
    );
    Ok(examples)
}

/// Trains a multinomial naive Bayes model with the given smoothing.
///
/// Classes are ordered alphabetically; the vocabulary is every token seen
/// in training.
///
/// # Errors
///
/// Returns [`ClassifierError::InvalidAlpha`] if `alpha` is not positive and
/// finite, or [`ClassifierError::EmptyTrainingSet`] if `examples` is empty.
pub fn train(examples: &[LabeledText], alpha: f64) -> Result<NaiveBayesModel, ClassifierError> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(ClassifierError::InvalidAlpha { alpha });
    }
    if examples.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }

    let classes: Vec<String> = examples
        .iter()
        .map(|e| e.label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let class_pos: BTreeMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut docs_per_class = vec![0_u32; classes.len()];
    let mut tokens_per_class = vec![0_u32; classes.len()];
    let mut counts: BTreeMap<String, Vec<u32>> = BTreeMap::new();

    for example in examples {
        let class = class_pos[example.label.as_str()];
        docs_per_class[class] += 1;

        for (token, count) in token_counts(&example.text) {
            counts.entry(token).or_insert_with(|| vec![0; classes.len()])[class] += count;
            tokens_per_class[class] += count;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let vocabulary = counts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let total_docs = examples.len() as f64;

    let class_log_prior = docs_per_class
        .iter()
        .map(|&n| (f64::from(n) / total_docs).ln())
        .collect();

    let feature_log_prob = counts
        .into_iter()
        .map(|(token, per_class)| {
            let log_probs = per_class
                .iter()
                .zip(&tokens_per_class)
                .map(|(&n, &total)| {
                    ((f64::from(n) + alpha) / alpha.mul_add(vocabulary, f64::from(total))).ln()
                })
                .collect();
            (token, log_probs)
        })
        .collect();

    log::info!(
        "Trained naive Bayes model: {} classes, {} tokens",
        classes.len(),
        vocabulary
    );

    Ok(NaiveBayesModel {
        classes,
        class_log_prior,
        feature_log_prob,
    })
}
