//! Corpus ingestion and normalization
//!
//! Raw patent rows come in from a CSV table, get filtered and sorted, and
//! leave as immutable canonical documents: one searchable string per record
//! plus the structured fields it was rendered from.

mod format;
mod loader;
mod normalizer;

pub use format::{extract_abstract, extract_date, extract_title, render, FormatError};
pub use loader::load_csv;
pub use normalizer::{normalize, NormalizedCorpus, SkipReason, SkippedRecord};

use serde::{Deserialize, Serialize};

/// One source row as it appears in the patent table.
///
/// Cells are optional at this boundary; the normalizer decides what to do
/// with incomplete rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub patent_number: Option<String>,
    #[serde(default)]
    pub patent_title: Option<String>,
    #[serde(default)]
    pub patent_abstract: Option<String>,
    #[serde(default)]
    pub patent_date: Option<String>,
}

/// Normalized, immutable form of one record.
///
/// `text` is the canonical concatenation used as the embedding input and as
/// the payload of the query boundary. The structured fields are carried
/// alongside so presentation never has to re-parse the concatenation; title
/// and abstract are lowercased, the date is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub date: String,
    pub text: String,
}

impl CanonicalDocument {
    pub fn new(id: impl Into<String>, title: &str, abstract_text: &str, date: &str) -> Self {
        let title = title.to_lowercase();
        let abstract_text = abstract_text.to_lowercase();
        let text = format::render(&title, &abstract_text, date);
        Self {
            id: id.into(),
            title,
            abstract_text,
            date: date.to_string(),
            text,
        }
    }
}
