//! Semantic search over the built index

use crate::embedding::EmbeddingProvider;
use crate::index::{ScoredDocument, VectorIndex};
use crate::retrieval::SearchQuery;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector search failed: {0}")]
    Index(String),
}

/// Read-only searcher over an immutable index snapshot.
///
/// Built once per corpus load; safe to share across query threads.
pub struct SemanticSearcher {
    provider: Arc<dyn EmbeddingProvider>,
    index: VectorIndex,
}

impl SemanticSearcher {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, index: VectorIndex) -> Self {
        Self { provider, index }
    }

    /// Embed the query text and rank the corpus against it.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<ScoredDocument>, SearchError> {
        if query.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "Query text cannot be empty".to_string(),
            ));
        }
        if query.limit == 0 {
            return Err(SearchError::InvalidQuery(
                "Result limit must be positive".to_string(),
            ));
        }

        let query_vector = self
            .provider
            .embed(&query.text)
            .map_err(|e| SearchError::Embedding(e.to_string()))?;

        self.index
            .query(&query_vector, query.limit)
            .map_err(|e| SearchError::Index(e.to_string()))
    }

    /// The underlying index snapshot
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}
