//! Embedding provider trait and fastembed implementation

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

/// Model used when the configuration does not name one
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Models the fastembed backend accepts
pub const SUPPORTED_MODELS: [&str; 3] =
    ["all-MiniLM-L6-v2", "bge-small-en-v1.5", "bge-base-en-v1.5"];

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Model initialization failed: {0}")]
    Initialization(String),

    #[error("Unsupported model: {0} (supported: all-MiniLM-L6-v2, bge-small-en-v1.5, bge-base-en-v1.5)")]
    UnsupportedModel(String),

    #[error("Embedding generation failed for {context:?}: {message}")]
    Generation { context: String, message: String },

    #[error("Cannot embed empty text")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Trait for embedding providers
///
/// Identical input text must yield an identical vector for a fixed model.
/// Implementations are `Send + Sync` so a built index can serve concurrent
/// query threads through one shared provider.
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Generate embeddings for multiple texts, preserving input order.
    ///
    /// Unlike per-text embedding, a single unembeddable text fails the whole
    /// batch; callers decide whether to skip or abort.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Fixed output dimension of the loaded model
    fn dimension(&self) -> usize;

    /// Name of the loaded model
    fn model_name(&self) -> &str;
}

/// Local embedding generation via fastembed.
///
/// Models are downloaded on demand to `~/.cache/huggingface/` on first use;
/// the default all-MiniLM-L6-v2 is ~90MB at 384 dimensions, bge-small-en-v1.5
/// is 384-dim with better accuracy, bge-base-en-v1.5 is 768-dim.
pub struct FastEmbedProvider {
    model: TextEmbedding,
    model_name: String,
    dimension: usize,
}

fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize), EmbeddingError> {
    match name {
        "all-MiniLM-L6-v2" | "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        other => Err(EmbeddingError::UnsupportedModel(other.to_string())),
    }
}

impl FastEmbedProvider {
    /// Load the named model, downloading it if not cached.
    pub fn new(model_name: &str) -> Result<Self, EmbeddingError> {
        let (embedding_model, dimension) = resolve_model(model_name)?;

        tracing::info!(
            "Initializing embedding model: {} ({}D, downloaded on first use)",
            model_name,
            dimension
        );

        let init_options = InitOptions::new(embedding_model).with_show_download_progress(true);
        let model = TextEmbedding::try_new(init_options)
            .map_err(|e| EmbeddingError::Initialization(e.to_string()))?;

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
        })
    }

    /// Load the default model (all-MiniLM-L6-v2).
    pub fn with_default_model() -> Result<Self, EmbeddingError> {
        Self::new(DEFAULT_MODEL)
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut vectors = self
            .model
            .embed(vec![text.to_string()], None)
            .map_err(|e| EmbeddingError::Generation {
                context: text.to_string(),
                message: e.to_string(),
            })?;

        let vector = vectors.pop().ok_or_else(|| EmbeddingError::Generation {
            context: text.to_string(),
            message: "no embedding returned".to_string(),
        })?;

        self.check_dimension(&vector)?;

        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(EmbeddingError::EmptyInput);
        }

        let vectors = self
            .model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingError::Generation {
                context: format!("batch of {} texts", texts.len()),
                message: e.to_string(),
            })?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::Generation {
                context: format!("batch of {} texts", texts.len()),
                message: format!("expected {} embeddings, got {}", texts.len(), vectors.len()),
            });
        }

        for vector in &vectors {
            self.check_dimension(vector)?;
        }

        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
