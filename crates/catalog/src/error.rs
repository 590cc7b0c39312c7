//! Error type for catalog orchestration.

use thiserror::Error;

/// Errors surfaced by the catalog service: either the storage backend or the
/// external lookup failed. A lookup with no results is not an error and never
/// appears here.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] bibliotek_storage::StoreError),

    #[error(transparent)]
    Lookup(#[from] bibliotek_lookup::LookupError),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
