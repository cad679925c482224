//! Query boundary: a free-text string in, ranked documents out
//!
//! This is the entire API surface the presentation layer consumes.

mod searcher;

pub use searcher::{SearchError, SemanticSearcher};

use serde::{Deserialize, Serialize};

/// One retrieval request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text
    pub text: String,

    /// Maximum number of results
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            limit,
        }
    }
}
