//! Error types for the Open Library client.

use thiserror::Error;

/// Errors from the lookup client.
///
/// A search with no results is not an error; `search` reports it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed")]
    Request(#[source] reqwest::Error),

    #[error("lookup returned error status {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to decode lookup response")]
    Decode(#[source] reqwest::Error),
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
