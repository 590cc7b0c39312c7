//! Serde shapes for the Open Library endpoints we touch.
//!
//! Every field is optional. Anything the API leaves out simply stays out of
//! the enrichment record instead of failing the decode.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchDoc {
    /// Work key, e.g. `/works/OL27448W`.
    pub key: Option<String>,
    pub first_publish_year: Option<i32>,
    /// Cover image id on covers.openlibrary.org.
    pub cover_i: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkResponse {
    pub description: Option<WorkDescription>,
    pub rating: Option<WorkRating>,
}

/// Work descriptions arrive either as a bare string or as a
/// `{ "type": ..., "value": ... }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WorkDescription {
    Text(String),
    Value { value: String },
}

impl WorkDescription {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Value { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkRating {
    pub average: Option<f64>,
}
