//! Error types for chenkit-core.

use thiserror::Error;

/// Errors raised by the semantic index and its embedding backend.
///
/// Querying an empty index is not an error; it returns no results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// No usable embedding backend. Fatal to index construction only; the
    /// host is expected to fall back to keyword search.
    #[error("Embedding backend unavailable: {0}")]
    DependencyUnavailable(String),
    /// Empty or whitespace-only query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// A tuning parameter outside its allowed range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The backend failed to embed a batch. Never retried.
    #[error("Embedding failed: {0}")]
    Embedding(String),
    /// The backend returned vectors of the wrong size or count.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
