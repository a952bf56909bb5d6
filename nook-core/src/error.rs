//! Error types for Nook Core
//!
//! Services never hand these to their callers: the search service turns a
//! failure into an empty result list, the library service logs and keeps its
//! in-memory state. The typed errors exist so the layers underneath (store,
//! catalog client) can say exactly what went wrong before it is absorbed.

use thiserror::Error;

/// Result type alias using NookError
pub type Result<T> = std::result::Result<T, NookError>;

/// Top-level error type for all Nook operations
#[derive(Debug, Error)]
pub enum NookError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while talking to the external book catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Catalog returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Corrupt value under {key}: {reason}")]
    Corrupt { key: String, reason: String },
}
