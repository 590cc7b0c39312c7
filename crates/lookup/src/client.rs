//! Open Library HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dto::{SearchResponse, WorkResponse};
use crate::error::{LookupError, Result};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org";
const COVERS_URL: &str = "https://covers.openlibrary.org/b";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("bibliotek/", env!("CARGO_PKG_VERSION"));

/// Normalized enrichment data for one book.
///
/// Any field the API did not provide stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub cover_url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub first_publish_year: Option<i32>,
}

/// Client for the Open Library search and works endpoints.
///
/// Read-only and unauthenticated. Requests carry a 30-second timeout.
pub struct OpenLibraryClient {
    http: reqwest::Client,
    base_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    pub fn new() -> Self {
        Self::with_base_urls(OPEN_LIBRARY_URL, COVERS_URL)
    }

    /// Point the client at custom endpoints, e.g. a mock server in tests.
    pub fn with_base_urls(
        base_url: impl Into<String>,
        covers_url: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            covers_url: covers_url.into(),
        }
    }

    /// Search for a book and assemble whatever enrichment data is available.
    ///
    /// Takes the first search result as-is; when it references a work, a
    /// second request fetches the work's description and rating. Returns
    /// `Ok(None)` when the search has no results at all.
    pub async fn search(&self, title: &str, author: Option<&str>) -> Result<Option<BookInfo>> {
        let mut query = format!("title:{title}");
        if let Some(author) = author {
            query.push_str(" AND author:");
            query.push_str(author);
        }
        debug!(%query, "searching open library");

        let url = format!("{}/search.json", self.base_url);
        let response: SearchResponse = self
            .get_json(self.http.get(&url).query(&[("q", &query)]))
            .await?;

        let Some(doc) = response.docs.into_iter().next() else {
            debug!(%query, "no search results");
            return Ok(None);
        };

        let mut info = BookInfo {
            first_publish_year: doc.first_publish_year,
            cover_url: doc
                .cover_i
                .map(|cover_id| format!("{}/id/{}-M.jpg", self.covers_url, cover_id)),
            ..BookInfo::default()
        };

        if let Some(key) = doc.key.as_deref() {
            let work_id = key.rsplit('/').next().unwrap_or(key);
            let work = self.work_details(work_id).await?;
            info.description = work.description.map(|d| d.into_text());
            info.rating = work.rating.and_then(|rating| rating.average);
        }

        Ok(Some(info))
    }

    /// Fetch extended details for one work.
    async fn work_details(&self, work_id: &str) -> Result<WorkResponse> {
        debug!(%work_id, "fetching work details");
        let url = format!("{}/works/{}.json", self.base_url, work_id);
        self.get_json(self.http.get(&url)).await
    }

    async fn get_json<T>(&self, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request.send().await.map_err(LookupError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }
        response.json().await.map_err(LookupError::Decode)
    }
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}
