//! Embedding generation
//!
//! Maps text to fixed-length dense vectors. The `EmbeddingProvider` trait is
//! the seam between the retrieval core and the inference backend; the
//! production backend is fastembed running locally (all-MiniLM-L6-v2,
//! 384-dim by default).

mod provider;

pub use provider::{
    EmbeddingError, EmbeddingProvider, FastEmbedProvider, DEFAULT_MODEL, SUPPORTED_MODELS,
};
