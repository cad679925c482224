//! Shared test fixtures

use patseek::embedding::{EmbeddingError, EmbeddingProvider};
use std::collections::HashMap;

/// Deterministic in-process embedding provider for tests: maps exact texts
/// to fixed vectors so test geometry is fully controlled. Unregistered text
/// fails the same way a backend failure would.
pub struct StubProvider {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl StubProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dimension,
        }
    }

    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }
}

impl EmbeddingProvider for StubProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::Generation {
                context: text.to_string(),
                message: "no stub vector registered".to_string(),
            })
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}
