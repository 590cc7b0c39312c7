//! Remote jsonbin.io storage backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::backends::next_id;
use crate::error::{Result, StoreError};
use crate::models::{Book, BookDraft, BookId, BookPatch};
use crate::traits::BookStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Storage backend keeping the whole record set in a single JSON document on
/// jsonbin.io.
///
/// Reads fetch the entire document; mutations fetch, modify in memory, and
/// replace the document wholesale, so every mutation costs two round trips.
/// No conditional headers are sent, so concurrent writers race the same way
/// the file backend's do.
pub struct JsonBinStore {
    client: reqwest::Client,
    bin_url: String,
    api_key: String,
}

/// Shape of the document jsonbin returns on GET. The PUT body is the bare
/// record array; jsonbin wraps it again on the next read.
#[derive(Debug, Deserialize)]
struct BinDocument {
    #[serde(default)]
    record: Vec<Book>,
}

impl JsonBinStore {
    /// Create a store for the bin `bin_id` on the service at `base_url`
    /// (e.g. `https://api.jsonbin.io/v3`), authenticated with `api_key`.
    pub fn new(
        base_url: &str,
        bin_id: &str,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            bin_url: format!("{}/b/{}", base_url.trim_end_matches('/'), bin_id),
            api_key: api_key.into(),
        }
    }

    async fn fetch_records(&self) -> Result<Vec<Book>> {
        debug!(url = %self.bin_url, "fetching remote document");
        let response = self
            .client
            .get(&self.bin_url)
            .header("X-Master-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("jsonbin GET failed: {}", e)),
            })?
            .error_for_status()
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("jsonbin GET returned error status: {}", e)),
            })?;

        let document: BinDocument =
            response.json().await.map_err(|e| StoreError::Conversion {
                message: "failed to decode remote document".to_string(),
                source: Some(eyre::eyre!("{}", e)),
            })?;

        Ok(document.record)
    }

    async fn replace_records(&self, records: &[Book]) -> Result<()> {
        debug!(url = %self.bin_url, count = records.len(), "replacing remote document");
        self.client
            .put(&self.bin_url)
            .header("X-Master-Key", &self.api_key)
            .json(records)
            .send()
            .await
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("jsonbin PUT failed: {}", e)),
            })?
            .error_for_status()
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("jsonbin PUT returned error status: {}", e)),
            })?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for JsonBinStore {
    async fn get(&self, id: BookId) -> Result<Option<Book>> {
        let records = self.fetch_records().await?;
        Ok(records.into_iter().find(|book| book.id == id))
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Book>> {
        let records = self.fetch_records().await?;
        Ok(records
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, draft: BookDraft) -> Result<Book> {
        draft.validate()?;
        let mut records = self.fetch_records().await?;
        let book = draft.into_book(next_id(&records))?;
        records.push(book.clone());
        self.replace_records(&records).await?;
        info!(id = %book.id, title = %book.title, "book created in jsonbin store");
        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>> {
        patch.validate()?;
        let mut records = self.fetch_records().await?;
        let Some(book) = records.iter_mut().find(|book| book.id == id) else {
            debug!(%id, "book not found for update");
            return Ok(None);
        };
        patch.apply_to(book);
        let updated = book.clone();
        self.replace_records(&records).await?;
        info!(%id, "book updated in jsonbin store");
        Ok(Some(updated))
    }

    async fn delete(&self, id: BookId) -> Result<Option<Book>> {
        let mut records = self.fetch_records().await?;
        let Some(position) = records.iter().position(|book| book.id == id) else {
            debug!(%id, "book not found for delete");
            return Ok(None);
        };
        let removed = records.remove(position);
        self.replace_records(&records).await?;
        info!(%id, "book deleted from jsonbin store");
        Ok(Some(removed))
    }
}
