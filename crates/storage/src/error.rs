//! Error types for the catalog storage layer.

use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// A missing record is never represented here; lookups report absence as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid book data: {message}")]
    InvalidBook { message: String },

    #[error("storage backend error")]
    Backend {
        #[source]
        source: Option<eyre::Report>,
    },

    #[error("data conversion failed: {message}")]
    Conversion {
        message: String,
        #[source]
        source: Option<eyre::Report>,
    },
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
