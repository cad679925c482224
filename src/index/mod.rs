//! Exact-scan vector index
//!
//! Stores one (id, vector, document) entry per canonical document, built
//! once per corpus load and immutable afterwards. Queries are an exact
//! brute-force cosine scan over every entry: vectors are normalized at
//! insert, so cosine similarity is a dot product at query time. Ranking is
//! fully deterministic — a stable sort keeps insertion order for equal
//! scores, never hash order.

use crate::corpus::CanonicalDocument;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Cannot build an index from an empty corpus")]
    EmptyCorpus,

    #[error("Index holds no entries")]
    EmptyIndex,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Result count must be positive")]
    InvalidLimit,

    #[error("Embedding failed for batch starting at document {first_id}: {source}")]
    Embedding {
        first_id: String,
        source: EmbeddingError,
    },
}

/// One indexed document with its unit-length embedding
#[derive(Debug, Clone)]
struct IndexEntry {
    vector: Vec<f32>,
    document: CanonicalDocument,
}

/// One ranked hit: the document and its cosine similarity to the query
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub document: CanonicalDocument,
    pub score: f32,
}

/// Immutable in-memory vector index over the normalized corpus
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: usize,
}

impl VectorIndex {
    /// Embed every document through the provider (in batches) and store the
    /// entries in corpus order.
    ///
    /// Fails on an empty corpus, on any embedding failure, and on any
    /// embedding whose dimension disagrees with the first one stored.
    pub fn build(
        provider: &dyn EmbeddingProvider,
        documents: &[CanonicalDocument],
        batch_size: usize,
    ) -> Result<Self, IndexError> {
        if documents.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        let batch_size = batch_size.max(1);
        let mut entries = Vec::with_capacity(documents.len());
        let mut dimension = None;

        for chunk in documents.chunks(batch_size) {
            let texts: Vec<String> = chunk.iter().map(|d| d.text.clone()).collect();
            let vectors = provider
                .embed_batch(&texts)
                .map_err(|e| IndexError::Embedding {
                    first_id: chunk[0].id.clone(),
                    source: e,
                })?;

            for (document, vector) in chunk.iter().zip(vectors) {
                let expected = *dimension.get_or_insert(vector.len());
                if vector.len() != expected {
                    return Err(IndexError::DimensionMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
                entries.push(IndexEntry {
                    vector: normalize(vector),
                    document: document.clone(),
                });
            }

            debug!("Indexed batch of {} documents", chunk.len());
        }

        let dimension = dimension.unwrap_or(0);
        info!(
            "Vector index built: {} entries, {} dimensions",
            entries.len(),
            dimension
        );

        Ok(Self { entries, dimension })
    }

    /// Return the `k` entries most similar to the query vector, ranked by
    /// descending cosine similarity; ties keep ascending insertion order.
    ///
    /// `k` larger than the entry count returns all entries ranked.
    pub fn query(&self, query_vector: &[f32], k: usize) -> Result<Vec<ScoredDocument>, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidLimit);
        }
        if self.entries.is_empty() {
            return Err(IndexError::EmptyIndex);
        }
        if query_vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query_vector.len(),
            });
        }

        let query = normalize(query_vector.to_vec());

        let mut hits: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (position, dot(&query, &entry.vector)))
            .collect();

        // stable sort: equal scores keep insertion order
        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        hits.truncate(k);

        Ok(hits
            .into_iter()
            .map(|(position, score)| ScoredDocument {
                document: self.entries[position].document.clone(),
                score,
            })
            .collect())
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimension shared by all entries
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scale to unit length; the zero vector stays as-is.
fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}
