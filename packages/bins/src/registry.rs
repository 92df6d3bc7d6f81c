//! Category -> [`BinIndex`] registry.
//!
//! Built once at process startup and never mutated afterwards. Loading
//! degrades instead of failing: a missing or corrupt artifact produces an
//! empty registry, and every query then takes the unknown-category path.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ewaste_bins_models::BinRecord;

use crate::RegistryError;
use crate::artifact::{self, ARTIFACT_VERSION, RegistryArtifact};
use crate::index::BinIndex;

/// Read-only mapping from waste category to its bin index.
#[derive(Default)]
pub struct BinRegistry {
    indexes: BTreeMap<String, BinIndex>,
}

impl BinRegistry {
    /// Creates a registry with no categories.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups `records` by category and builds one index per category.
    ///
    /// Records keep their relative order within a category.
    ///
    /// # Errors
    ///
    /// Returns an error if a `bin_id` repeats or a record has invalid
    /// coordinates.
    pub fn from_records(
        records: impl IntoIterator<Item = BinRecord>,
    ) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        let mut groups: BTreeMap<String, Vec<BinRecord>> = BTreeMap::new();

        for record in records {
            validate(&record, &mut seen)?;
            groups.entry(record.category.clone()).or_default().push(record);
        }

        Ok(Self::from_groups(groups))
    }

    /// Builds a registry from a decoded artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact version is unsupported or any
    /// record violates the dataset invariants.
    pub fn from_artifact(artifact: RegistryArtifact) -> Result<Self, RegistryError> {
        if artifact.version != ARTIFACT_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                found: artifact.version,
                expected: ARTIFACT_VERSION,
            });
        }

        let mut seen = BTreeSet::new();
        for (group, records) in &artifact.categories {
            if records.is_empty() {
                log::warn!("Category '{group}' has no bins in the artifact");
            }
            for record in records {
                if &record.category != group {
                    return Err(RegistryError::CategoryMismatch {
                        bin_id: record.bin_id,
                        group: group.clone(),
                        category: record.category.clone(),
                    });
                }
                validate(record, &mut seen)?;
            }
        }

        Ok(Self::from_groups(artifact.categories))
    }

    /// Reads and validates the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing, undecodable, or
    /// invalid.
    pub fn try_load(path: &Path) -> Result<Self, RegistryError> {
        Self::from_artifact(artifact::read(path)?)
    }

    /// Loads the registry from `path`, falling back to an empty registry
    /// if the artifact is missing or corrupt.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        log::info!("Loading bin registry from {}", path.display());

        if !path.exists() {
            log::warn!(
                "Bin registry not found at {}; every category will use the fallback bin",
                path.display()
            );
            return Self::empty();
        }

        match Self::try_load(path) {
            Ok(registry) => {
                log::info!(
                    "Loaded {} bins across {} categories",
                    registry.bin_count(),
                    registry.len()
                );
                registry
            }
            Err(e) => {
                log::error!("Failed to load bin registry from {}: {e}", path.display());
                Self::empty()
            }
        }
    }

    /// Converts the registry back into its serializable form.
    #[must_use]
    pub fn to_artifact(&self) -> RegistryArtifact {
        RegistryArtifact::new(
            self.indexes
                .iter()
                .map(|(category, index)| (category.clone(), index.records().to_vec()))
                .collect(),
        )
    }

    /// Returns the index for `category`.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&BinIndex> {
        self.indexes.get(category)
    }

    /// Indexed category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Number of indexed categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Whether no categories are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Total number of bins across all categories.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.indexes.values().map(BinIndex::len).sum()
    }

    fn from_groups(groups: BTreeMap<String, Vec<BinRecord>>) -> Self {
        let indexes = groups
            .into_iter()
            .map(|(category, records)| {
                log::debug!("Indexing {} bins for '{category}'", records.len());
                (category, BinIndex::build(records))
            })
            .collect();
        Self { indexes }
    }

    #[cfg(test)]
    pub(crate) fn insert_index(&mut self, category: &str, index: BinIndex) {
        self.indexes.insert(category.to_string(), index);
    }
}

fn validate(record: &BinRecord, seen: &mut BTreeSet<i64>) -> Result<(), RegistryError> {
    if !record.has_valid_coordinates() {
        return Err(RegistryError::InvalidCoordinates {
            bin_id: record.bin_id,
            latitude: record.latitude,
            longitude: record.longitude,
        });
    }
    if !seen.insert(record.bin_id) {
        return Err(RegistryError::DuplicateBinId {
            bin_id: record.bin_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record(bin_id: i64, category: &str, latitude: f64, longitude: f64) -> BinRecord {
        BinRecord {
            bin_id,
            address: format!("Bin {bin_id}"),
            latitude,
            longitude,
            category: category.to_string(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ewaste-{}-{name}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn groups_records_by_category() {
        let registry = BinRegistry::from_records(vec![
            record(1, "Battery", 28.61, 77.20),
            record(2, "Glass", 28.62, 77.21),
            record(3, "Battery", 28.63, 77.22),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.bin_count(), 3);
        assert_eq!(registry.categories().collect::<Vec<_>>(), ["Battery", "Glass"]);

        let battery: Vec<i64> = registry
            .get("Battery")
            .unwrap()
            .records()
            .iter()
            .map(|r| r.bin_id)
            .collect();
        assert_eq!(battery, [1, 3]);
    }

    #[test]
    fn rejects_duplicate_bin_ids_across_categories() {
        let result = BinRegistry::from_records(vec![
            record(1, "Battery", 28.61, 77.20),
            record(1, "Glass", 28.62, 77.21),
        ]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateBinId { bin_id: 1 })
        ));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let result = BinRegistry::from_records(vec![record(5, "Battery", 128.0, 77.20)]);
        assert!(matches!(
            result,
            Err(RegistryError::InvalidCoordinates { bin_id: 5, .. })
        ));
    }

    #[test]
    fn rejects_records_filed_under_the_wrong_category() {
        let mut categories = BTreeMap::new();
        categories.insert("Glass".to_string(), vec![record(1, "Battery", 0.0, 0.0)]);

        let result = BinRegistry::from_artifact(RegistryArtifact::new(categories));
        assert!(matches!(result, Err(RegistryError::CategoryMismatch { .. })));
    }

    #[test]
    fn rejects_unknown_artifact_versions() {
        let artifact = RegistryArtifact {
            version: ARTIFACT_VERSION + 1,
            categories: BTreeMap::new(),
        };
        assert!(matches!(
            BinRegistry::from_artifact(artifact),
            Err(RegistryError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn artifact_written_to_disk_loads_back() {
        let path = temp_path("registry.msgpack");
        let registry = BinRegistry::from_records(vec![
            record(1, "Battery", 28.6139, 77.2090),
            record(2, "Hazardous_Lamps", 28.6304, 77.2177),
        ])
        .unwrap();

        artifact::write(&path, &registry.to_artifact()).unwrap();
        let loaded = BinRegistry::load(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get("Hazardous_Lamps").unwrap().records(),
            registry.get("Hazardous_Lamps").unwrap().records()
        );
    }

    #[test]
    fn missing_artifact_yields_empty_registry() {
        let registry = BinRegistry::load(&temp_path("does-not-exist.msgpack"));
        assert!(registry.is_empty());
    }

    #[test]
    fn corrupt_artifact_yields_empty_registry() {
        let path = temp_path("corrupt.msgpack");
        std::fs::write(&path, b"definitely not messagepack").unwrap();

        let registry = BinRegistry::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(registry.is_empty());
    }
}
