//! Nearest-bin resolution.

use ewaste_bins_models::{EARTH_RADIUS_KM, NearestBin, Recommendation};

use crate::registry::BinRegistry;

impl BinRegistry {
    /// Finds the bin nearest to `(user_lat, user_lng)` that accepts
    /// `category`.
    ///
    /// Coordinates are decimal degrees and are not range-checked. The
    /// reported distance is the unit-sphere chord scaled by the Earth's
    /// mean radius, rounded to two decimals; for city-scale separations
    /// it matches the haversine distance to within rounding.
    ///
    /// Unknown categories yield [`Recommendation::Fallback`]; a lookup that
    /// cannot produce a bin yields [`Recommendation::Failed`].
    #[must_use]
    pub fn find_nearest_bin(&self, category: &str, user_lat: f64, user_lng: f64) -> Recommendation {
        let Some(index) = self.get(category) else {
            log::warn!("No bin index for category '{category}'; using the fallback bin");
            return Recommendation::fallback();
        };

        if !user_lat.is_finite() || !user_lng.is_finite() {
            return Recommendation::failed(format!(
                "coordinates ({user_lat}, {user_lng}) are not finite"
            ));
        }

        let Some((position, chord)) = index.nearest(user_lat.to_radians(), user_lng.to_radians())
        else {
            return Recommendation::failed(format!("no bins indexed for '{category}'"));
        };

        let Some(record) = index.get(position) else {
            return Recommendation::failed(format!(
                "index position {position} has no bin record ({} records)",
                index.len()
            ));
        };

        let distance_km = round_to_hundredths(chord * EARTH_RADIUS_KM);
        if !distance_km.is_finite() {
            return Recommendation::failed(format!("distance to bin {} is not finite", record.bin_id));
        }

        log::debug!(
            "Nearest '{category}' bin to ({user_lat}, {user_lng}) is {} at {distance_km} km",
            record.bin_id
        );

        Recommendation::Found(NearestBin {
            bin_id: record.bin_id,
            name: record.address.clone(),
            location: record.location(),
            distance_km,
        })
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
