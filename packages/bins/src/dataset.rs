//! CSV bin dataset reader.
//!
//! Expects a header row of `bin_id,address,latitude,longitude,category`.
//! Column order does not matter; surrounding whitespace is trimmed.

use std::io::Read;
use std::path::Path;

use ewaste_bins_models::BinRecord;

/// Errors from reading a bin dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// I/O error opening the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or row deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads all bin records from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is malformed.
pub fn read_csv(path: &Path) -> Result<Vec<BinRecord>, DatasetError> {
    let file = std::fs::File::open(path)?;
    let records = read_records(file)?;
    log::info!("Read {} bin records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads all bin records from a CSV stream.
///
/// # Errors
///
/// Returns an error if any row is malformed.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BinRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: BinRecord = row?;
        records.push(record);
    }
    Ok(records)
}
