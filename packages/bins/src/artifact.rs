//! On-disk registry artifact.
//!
//! The artifact is a `MessagePack` document holding, per category, the
//! ordered bin records of that category's index. The R-tree itself is
//! rebuilt from the records at load time; bulk loading is deterministic,
//! so the record order is all that has to be persisted.

use std::collections::BTreeMap;
use std::path::Path;

use ewaste_bins_models::BinRecord;
use serde::{Deserialize, Serialize};

/// Artifact format version written by this build.
pub const ARTIFACT_VERSION: u32 = 1;

/// Serialized form of a [`crate::BinRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryArtifact {
    /// Format version.
    pub version: u32,
    /// Category name -> records in index order.
    pub categories: BTreeMap<String, Vec<BinRecord>>,
}

impl RegistryArtifact {
    /// Creates an artifact at the current format version.
    #[must_use]
    pub const fn new(categories: BTreeMap<String, Vec<BinRecord>>) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            categories,
        }
    }
}

/// Errors from reading or writing an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `MessagePack` encoding failed.
    #[error("Encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// `MessagePack` decoding failed.
    #[error("Decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Reads and decodes an artifact from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid artifact.
pub fn read(path: &Path) -> Result<RegistryArtifact, ArtifactError> {
    let bytes = std::fs::read(path)?;
    Ok(rmp_serde::from_slice(&bytes)?)
}

/// Encodes `artifact` and writes it to `path`, creating parent directories
/// as needed.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn write(path: &Path, artifact: &RegistryArtifact) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let bytes = rmp_serde::to_vec_named(artifact)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
