//! Record normalization: filter, sort, select, lowercase, canonicalize
//!
//! Pure transformation from raw rows to canonical documents. Incomplete rows
//! are dropped, but never silently: every drop is returned alongside the
//! documents with a reason, and logged at warn level.

use super::{CanonicalDocument, RawRecord};
use ahash::{HashSet, HashSetExt};
use std::cmp::Ordering;
use tracing::warn;

/// Why a raw record was excluded from the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingNumber,
    MissingTitle,
    MissingAbstract,
    MissingDate,
    DuplicateNumber,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::MissingNumber => "missing patent_number",
            SkipReason::MissingTitle => "missing patent_title",
            SkipReason::MissingAbstract => "missing patent_abstract",
            SkipReason::MissingDate => "missing patent_date",
            SkipReason::DuplicateNumber => "duplicate patent_number",
        };
        f.write_str(reason)
    }
}

/// One dropped record, kept so callers can audit drops
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    /// 1-based row position in the source table
    pub row: usize,
    pub number: Option<String>,
    pub reason: SkipReason,
}

/// Result of normalization: documents in final insertion order, plus the
/// audit trail of dropped records.
#[derive(Debug, Default)]
pub struct NormalizedCorpus {
    pub documents: Vec<CanonicalDocument>,
    pub skipped: Vec<SkippedRecord>,
}

/// Normalize raw records into canonical documents.
///
/// Records missing any required field are dropped with a reason. If
/// `title_filter` is given, only records whose title contains it
/// (case-insensitively) are retained. Surviving records are sorted ascending
/// by identifier before canonicalization so insertion order is deterministic
/// across runs; identifiers in the output are unique.
pub fn normalize(records: &[RawRecord], title_filter: Option<&str>) -> NormalizedCorpus {
    let filter = title_filter.map(|f| f.to_lowercase());
    let mut kept: Vec<(&str, &str, &str, &str)> = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for (position, record) in records.iter().enumerate() {
        let row = position + 1;
        let skip = |reason: SkipReason| SkippedRecord {
            row,
            number: record.patent_number.clone(),
            reason,
        };

        let number = match record.patent_number.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped.push(skip(SkipReason::MissingNumber));
                continue;
            }
        };
        let title = match record.patent_title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => {
                skipped.push(skip(SkipReason::MissingTitle));
                continue;
            }
        };
        let abstract_text = match record.patent_abstract.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => {
                skipped.push(skip(SkipReason::MissingAbstract));
                continue;
            }
        };
        let date = match record.patent_date.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => {
                skipped.push(skip(SkipReason::MissingDate));
                continue;
            }
        };

        if !seen.insert(number) {
            skipped.push(skip(SkipReason::DuplicateNumber));
            continue;
        }

        if let Some(filter) = &filter {
            if !title.to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }

        kept.push((number, title, abstract_text, date));
    }

    kept.sort_by(|a, b| compare_identifiers(a.0, b.0));

    for skip in &skipped {
        warn!(
            "Skipping record at row {} ({}): {}",
            skip.row,
            skip.number.as_deref().unwrap_or("?"),
            skip.reason
        );
    }

    let documents = kept
        .into_iter()
        .map(|(number, title, abstract_text, date)| {
            CanonicalDocument::new(number, title, abstract_text, date)
        })
        .collect();

    NormalizedCorpus { documents, skipped }
}

/// Numeric order when both identifiers parse as integers, lexicographic
/// otherwise.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, title: &str, abstract_text: &str, date: &str) -> RawRecord {
        RawRecord {
            patent_number: Some(number.to_string()),
            patent_title: Some(title.to_string()),
            patent_abstract: Some(abstract_text.to_string()),
            patent_date: Some(date.to_string()),
        }
    }

    #[test]
    fn sorts_ascending_by_numeric_identifier() {
        let records = vec![
            record("10", "B", "b", "2020-01-01"),
            record("2", "A", "a", "2019-01-01"),
        ];
        let corpus = normalize(&records, None);
        let ids: Vec<&str> = corpus.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["2", "10"]);
    }

    #[test]
    fn drops_incomplete_records_with_reason() {
        let mut missing_abstract = record("1", "Title", "", "2020-01-01");
        missing_abstract.patent_abstract = None;
        let records = vec![missing_abstract, record("2", "Title", "abs", "2020-01-01")];

        let corpus = normalize(&records, None);
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.skipped.len(), 1);
        assert_eq!(corpus.skipped[0].row, 1);
        assert_eq!(corpus.skipped[0].reason, SkipReason::MissingAbstract);
    }

    #[test]
    fn empty_cells_count_as_missing() {
        let records = vec![record("1", "", "abs", "2020-01-01")];
        let corpus = normalize(&records, None);
        assert!(corpus.documents.is_empty());
        assert_eq!(corpus.skipped[0].reason, SkipReason::MissingTitle);
    }

    #[test]
    fn title_filter_is_case_insensitive() {
        let records = vec![
            record("1", "Neural Net Widget", "a", "2020-01-01"),
            record("2", "Photonic Sensor", "b", "2019-05-01"),
        ];
        let corpus = normalize(&records, Some("NEURAL"));
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.documents[0].id, "1");
        // filtered-out records are not part of the skip audit
        assert!(corpus.skipped.is_empty());
    }

    #[test]
    fn duplicate_identifiers_keep_first_occurrence() {
        let records = vec![
            record("1", "First", "a", "2020-01-01"),
            record("1", "Second", "b", "2020-02-01"),
        ];
        let corpus = normalize(&records, None);
        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.documents[0].title, "first");
        assert_eq!(corpus.skipped[0].reason, SkipReason::DuplicateNumber);
    }

    #[test]
    fn non_numeric_identifiers_sort_lexicographically() {
        let records = vec![
            record("US-B", "B", "b", "2020-01-01"),
            record("US-A", "A", "a", "2019-01-01"),
        ];
        let corpus = normalize(&records, None);
        let ids: Vec<&str> = corpus.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["US-A", "US-B"]);
    }
}
