#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearest disposal bin lookup.
//!
//! Bins are partitioned by waste category. Each category gets its own
//! [`BinIndex`], an R-tree over the bins' coordinates projected onto the
//! unit sphere. The [`BinRegistry`] maps category names to indexes and is
//! loaded once at startup from a `MessagePack` artifact written by
//! [`artifact::write`]. After that it is read-only and can be shared
//! across threads without locking.
//!
//! [`BinRegistry::find_nearest_bin`] never fails: unknown categories and
//! broken lookups are reported as [`Recommendation`] variants.

pub mod artifact;
pub mod dataset;
pub mod index;
pub mod registry;
mod resolver;

pub use ewaste_bins_models::{
    BinRecord, CalculationFailure, FallbackBin, Location, NearestBin, Recommendation,
};
pub use index::BinIndex;
pub use registry::BinRegistry;

/// Default location of the registry artifact, relative to the working
/// directory.
pub const DEFAULT_REGISTRY_PATH: &str = "data/models/bin_registry.msgpack";

/// Errors raised while building or loading a [`BinRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Reading or decoding the artifact failed.
    #[error("Artifact error: {0}")]
    Artifact(#[from] artifact::ArtifactError),

    /// The artifact was written by an incompatible version.
    #[error("Unsupported artifact version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the artifact.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Two records share a `bin_id`.
    #[error("Duplicate bin_id {bin_id}")]
    DuplicateBinId {
        /// The repeated identifier.
        bin_id: i64,
    },

    /// A record's coordinates are not finite or out of range.
    #[error("Bin {bin_id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Offending bin.
        bin_id: i64,
        /// Recorded latitude.
        latitude: f64,
        /// Recorded longitude.
        longitude: f64,
    },

    /// A record is stored under a category it does not belong to.
    #[error("Bin {bin_id} is stored under '{group}' but has category '{category}'")]
    CategoryMismatch {
        /// Offending bin.
        bin_id: i64,
        /// Category group the record was found in.
        group: String,
        /// The record's own category.
        category: String,
    },
}
