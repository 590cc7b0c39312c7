//! Mapping from domain outcomes to HTTP responses.
//!
//! Not-found gets its own response; validation failures report their message;
//! every other failure collapses into an opaque 500 with the details logged,
//! never leaked.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use bibliotek_catalog::CatalogError;
use bibliotek_storage::StoreError;

/// Error type returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// The requested record does not exist.
    NotFound,
    /// The request payload failed validation.
    Invalid(String),
    /// Anything else.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "book not found".to_string()),
            ApiError::Invalid(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "operation failed".to_string())
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidBook { message } => ApiError::Invalid(message),
            other => {
                error!(error = ?other, "storage operation failed");
                ApiError::Internal
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Store(err) => err.into(),
            CatalogError::Lookup(err) => {
                error!(error = ?err, "external lookup failed");
                ApiError::Internal
            }
        }
    }
}
