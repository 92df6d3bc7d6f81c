#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Disposal bin types shared by the bin index, the CLI, and the API server.
//!
//! A [`BinRecord`] is one physical bin from the dataset. A
//! [`Recommendation`] is the outcome of a nearest-bin query. Every outcome,
//! including "no data for this category" and "the lookup failed", is a
//! well-formed variant rather than an error, so callers can serialize it
//! straight into a response.

use serde::{Deserialize, Serialize};

/// Mean radius of the Earth in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Bin name returned when no bins are indexed for a category.
pub const FALLBACK_BIN_NAME: &str = "General Central Dump";

/// Message attached to the fallback recommendation.
pub const NO_BINS_MESSAGE: &str = "No bins found for this category";

/// Location returned with the fallback recommendation (central Delhi).
pub const DEFAULT_LOCATION: Location = Location {
    lat: 28.6139,
    lng: 77.2090,
};

/// A physical disposal bin as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRecord {
    /// Unique bin identifier across the whole dataset.
    pub bin_id: i64,
    /// Human-readable name or street address.
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Waste category accepted by this bin.
    pub category: String,
}

impl BinRecord {
    /// Returns the bin's coordinates as a [`Location`].
    #[must_use]
    pub const fn location(&self) -> Location {
        Location {
            lat: self.latitude,
            lng: self.longitude,
        }
    }

    /// Whether the coordinates are finite and inside the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// The nearest bin for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestBin {
    /// Identifier of the matched bin.
    pub bin_id: i64,
    /// Bin name (the record's address).
    pub name: String,
    /// Bin coordinates.
    pub location: Location,
    /// Distance from the query point, rounded to two decimals.
    pub distance_km: f64,
}

/// Returned when no index exists for the requested category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackBin {
    /// Why the fallback was used.
    pub error: String,
    /// Name of the fallback bin.
    pub bin_name: String,
    /// Fallback coordinates.
    pub location: Location,
}

impl Default for FallbackBin {
    fn default() -> Self {
        Self {
            error: NO_BINS_MESSAGE.to_string(),
            bin_name: FALLBACK_BIN_NAME.to_string(),
            location: DEFAULT_LOCATION,
        }
    }
}

/// Returned when the spatial lookup itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationFailure {
    /// Description of the failure.
    pub error: String,
}

/// Outcome of a nearest-bin query.
///
/// Serialized untagged, so each variant keeps its own flat JSON shape. The
/// presence of an `error` field distinguishes the non-match variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    /// A bin was found.
    Found(NearestBin),
    /// The category has no indexed bins.
    Fallback(FallbackBin),
    /// The lookup failed.
    Failed(CalculationFailure),
}

impl Recommendation {
    /// Builds the fallback recommendation for an unknown category.
    #[must_use]
    pub fn fallback() -> Self {
        Self::Fallback(FallbackBin::default())
    }

    /// Builds a failure recommendation from a reason.
    #[must_use]
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(CalculationFailure {
            error: format!("Calculation failed: {reason}"),
        })
    }

    /// Returns the matched bin, if any.
    #[must_use]
    pub const fn as_found(&self) -> Option<&NearestBin> {
        match self {
            Self::Found(bin) => Some(bin),
            Self::Fallback(_) | Self::Failed(_) => None,
        }
    }

    /// Returns the error message for the non-match variants.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::Fallback(fallback) => Some(&fallback.error),
            Self::Failed(failure) => Some(&failure.error),
        }
    }
}
