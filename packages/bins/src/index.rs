//! R-tree index over the bins of a single category.
//!
//! Coordinates are converted to radians and projected onto the unit
//! sphere, so the Euclidean distance between two entries is the chord
//! between them. Chord length grows monotonically with great-circle
//! angle, which makes the R-tree's nearest neighbour the great-circle
//! nearest bin.

use ewaste_bins_models::BinRecord;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A bin's position on the unit sphere, tagged with its record position.
#[derive(Debug, Clone, Copy)]
struct IndexedBin {
    position: usize,
    point: [f64; 3],
}

impl RTreeObject for IndexedBin {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedBin {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Immutable nearest-neighbour index over one category's bins.
///
/// Entry `i` in the tree always refers to `records()[i]`.
pub struct BinIndex {
    tree: RTree<IndexedBin>,
    records: Vec<BinRecord>,
}

impl BinIndex {
    /// Bulk-loads an index over `records`, preserving their order.
    #[must_use]
    pub fn build(records: Vec<BinRecord>) -> Self {
        let entries: Vec<IndexedBin> = records
            .iter()
            .enumerate()
            .map(|(position, record)| IndexedBin {
                position,
                point: unit_vector(record.latitude.to_radians(), record.longitude.to_radians()),
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            records,
        }
    }

    /// Finds the entry closest to a point given in radians.
    ///
    /// Returns the record position and the chord distance on the unit
    /// sphere, or `None` if the index is empty.
    #[must_use]
    pub fn nearest(&self, lat_rad: f64, lng_rad: f64) -> Option<(usize, f64)> {
        let query = unit_vector(lat_rad, lng_rad);
        self.tree
            .nearest_neighbor(&query)
            .map(|entry| (entry.position, entry.distance_2(&query).sqrt()))
    }

    /// Returns the record at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&BinRecord> {
        self.records.get(position)
    }

    /// The indexed records in positional order.
    #[must_use]
    pub fn records(&self) -> &[BinRecord] {
        &self.records
    }

    /// Number of indexed bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Builds an index whose tree has no matching records. Only used to
    /// exercise the resolver's failure path.
    #[cfg(test)]
    pub(crate) fn detached(records: Vec<BinRecord>) -> Self {
        let tree = Self::build(records).tree;
        Self {
            tree,
            records: Vec::new(),
        }
    }
}

/// Projects a latitude/longitude pair in radians onto the unit sphere.
#[must_use]
pub fn unit_vector(lat_rad: f64, lng_rad: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lng, cos_lng) = lng_rad.sin_cos();
    [cos_lat * cos_lng, cos_lat * sin_lng, sin_lat]
}
