//! Patseek - Semantic Patent Retrieval
//!
//! Loads a fixed corpus of patent records (title + abstract + date),
//! normalizes each record into a canonical searchable string, embeds it
//! locally, and answers free-text queries with the k most semantically
//! similar records. Retrieval quality can be scored offline against a
//! labeled ground truth (Top-N accuracy).

pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod retrieval;

pub use error::{PatseekError, Result};
