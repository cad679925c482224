//! CSV corpus loader
//!
//! The only I/O in the corpus pipeline: reads the patent table
//! (`patent_number`, `patent_title`, `patent_abstract`, `patent_date`) into
//! in-memory raw records. Empty cells deserialize to `None` so the
//! normalizer's drop policy can account for them.

use super::RawRecord;
use crate::error::{PatseekError, Result};
use std::path::Path;
use tracing::info;

/// Load raw records from a patent CSV file.
///
/// A file that cannot be opened or parsed is a fatal corpus error; rows with
/// missing cells are not — they are handed to the normalizer as-is.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| PatseekError::Corpus {
        source: e,
        context: format!("Failed to open corpus file: {:?}", path),
    })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawRecord = row.map_err(|e| PatseekError::Corpus {
            source: e,
            context: format!("Failed to parse corpus row in {:?}", path),
        })?;
        records.push(record);
    }

    info!("Loaded {} raw records from {:?}", records.len(), path);

    Ok(records)
}
