//! Error types for trainer-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for key/value store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading a specimen catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("specimen at index {index} has no display name")]
    MissingDisplay { index: usize },

    #[error("duplicate specimen id {id} at index {index}")]
    DuplicateId { id: String, index: usize },
}

/// Errors raised by a key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to serialize stats: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}
