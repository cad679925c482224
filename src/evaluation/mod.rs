//! Top-N accuracy evaluation against a labeled ground truth
//!
//! The ground truth maps a query string to an ordered list of relevant
//! document titles. A query counts as a hit when any of its first N relevant
//! titles appears among the titles extracted from the retrieved set.

use crate::corpus::extract_title;
use crate::error::{PatseekError, Result};
use crate::index::ScoredDocument;
use crate::retrieval::{SearchQuery, SemanticSearcher};
use ahash::HashMap;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Number of leading ground-truth entries considered relevant by default
pub const DEFAULT_TOP_N: usize = 3;

/// Static mapping from query string to ordered relevant document titles
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    queries: HashMap<String, Vec<String>>,
}

impl GroundTruth {
    /// Load from a JSON object: `{"query": ["title", ...], ...}`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PatseekError::Io {
            source: e,
            context: format!("Failed to read ground truth file: {:?}", path),
        })?;
        let queries: HashMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| PatseekError::Json {
                source: e,
                context: format!("Failed to parse ground truth file: {:?}", path),
            })?;
        Ok(Self { queries })
    }

    pub fn insert(&mut self, query: impl Into<String>, titles: Vec<String>) {
        self.queries.insert(query.into(), titles);
    }

    /// Ordered relevant titles for a query, if it is labeled at all
    pub fn relevant(&self, query: &str) -> Option<&[String]> {
        self.queries.get(query).map(|titles| titles.as_slice())
    }

    pub fn queries(&self) -> impl Iterator<Item = &String> {
        self.queries.keys()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Verdict for a single query
#[derive(Debug, Clone, Serialize)]
pub struct QueryVerdict {
    pub query: String,
    pub hit: bool,
    pub retrieved: usize,
}

/// Aggregate evaluation over every labeled query
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub top_n: usize,
    pub verdicts: Vec<QueryVerdict>,
    /// Fraction of labeled queries with at least one top-N hit
    pub accuracy: f64,
}

impl EvaluationReport {
    pub fn hits(&self) -> usize {
        self.verdicts.iter().filter(|v| v.hit).count()
    }
}

/// Whether any of the first `n` ground-truth titles for `query` appears
/// among the titles extracted from the retrieved set.
///
/// The whole retrieved set counts, not just its first `n` entries. A query
/// without a ground-truth entry is vacuously unsatisfiable and evaluates to
/// false. Extracted titles are lowercase by construction, so ground-truth
/// titles are compared case-insensitively.
pub fn evaluate_top_n(
    query: &str,
    results: &[ScoredDocument],
    ground_truth: &GroundTruth,
    n: usize,
) -> Result<bool> {
    let relevant = match ground_truth.relevant(query) {
        Some(relevant) => relevant,
        None => return Ok(false),
    };

    let mut retrieved = Vec::with_capacity(results.len());
    for result in results {
        retrieved.push(extract_title(&result.document.text)?);
    }

    let take = n.min(relevant.len());
    Ok(relevant[..take].iter().any(|title| {
        let title = title.to_lowercase();
        retrieved.iter().any(|r| *r == title)
    }))
}

/// Run every labeled query through the searcher and aggregate the verdicts.
///
/// Queries are evaluated in sorted order so the report is deterministic.
pub fn evaluate_all(
    searcher: &SemanticSearcher,
    ground_truth: &GroundTruth,
    n: usize,
    limit: usize,
) -> Result<EvaluationReport> {
    let mut queries: Vec<&String> = ground_truth.queries().collect();
    queries.sort();

    let mut verdicts = Vec::with_capacity(queries.len());
    for query in queries {
        let results = searcher.search(&SearchQuery::new(query.clone(), limit))?;
        let hit = evaluate_top_n(query, &results, ground_truth, n)?;
        verdicts.push(QueryVerdict {
            query: query.clone(),
            hit,
            retrieved: results.len(),
        });
    }

    let hits = verdicts.iter().filter(|v| v.hit).count();
    let accuracy = if verdicts.is_empty() {
        0.0
    } else {
        hits as f64 / verdicts.len() as f64
    };

    info!(
        "Evaluated {} queries: {} hits, accuracy {:.2}",
        verdicts.len(),
        hits,
        accuracy
    );

    Ok(EvaluationReport {
        top_n: n,
        verdicts,
        accuracy,
    })
}
