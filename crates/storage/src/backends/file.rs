//! Local JSON-file storage backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::backends::next_id;
use crate::error::{Result, StoreError};
use crate::models::{Book, BookDraft, BookId, BookPatch};
use crate::traits::BookStore;

/// Storage backend keeping the whole record set in a single JSON-array file.
///
/// Every mutation is a read-modify-write of the entire file. The replacement
/// write goes through a sibling temp file and a rename, so a failed
/// serialization or write never truncates the existing contents. There is no
/// protection against concurrent writers; the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a new file-backed store at `path`.
    ///
    /// The file is not touched until [`initialize`](Self::initialize) or the
    /// first operation.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create the backing file with an empty record set if it is absent.
    pub async fn initialize(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Backend {
                    source: Some(eyre::eyre!("failed to create catalog directory: {}", e)),
                })?;
        }
        self.write_records(&[]).await?;
        debug!(path = %self.path.display(), "created empty catalog file");
        Ok(())
    }

    async fn read_records(&self) -> Result<Vec<Book>> {
        let content =
            fs::read_to_string(&self.path)
                .await
                .map_err(|e| StoreError::Backend {
                    source: Some(eyre::eyre!(
                        "failed to read catalog file {}: {}",
                        self.path.display(),
                        e
                    )),
                })?;

        serde_json::from_str(&content).map_err(|e| StoreError::Conversion {
            message: "failed to deserialize catalog file".to_string(),
            source: Some(eyre::eyre!("JSON error: {}", e)),
        })
    }

    async fn write_records(&self, records: &[Book]) -> Result<()> {
        let content =
            serde_json::to_string_pretty(records).map_err(|e| StoreError::Conversion {
                message: "failed to serialize catalog".to_string(),
                source: Some(eyre::eyre!("JSON error: {}", e)),
            })?;

        // Replacement write: the old contents stay intact until the rename.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("failed to write catalog file: {}", e)),
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("failed to replace catalog file: {}", e)),
            })?;

        Ok(())
    }
}

#[async_trait]
impl BookStore for JsonFileStore {
    async fn get(&self, id: BookId) -> Result<Option<Book>> {
        debug!(%id, "fetching book from file store");
        let records = self.read_records().await?;
        Ok(records.into_iter().find(|book| book.id == id))
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Book>> {
        debug!(skip, limit, "listing books from file store");
        let records = self.read_records().await?;
        Ok(records
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, draft: BookDraft) -> Result<Book> {
        draft.validate()?;
        let mut records = self.read_records().await?;
        let book = draft.into_book(next_id(&records))?;
        records.push(book.clone());
        self.write_records(&records).await?;
        info!(id = %book.id, title = %book.title, "book created in file store");
        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>> {
        patch.validate()?;
        let mut records = self.read_records().await?;
        let Some(book) = records.iter_mut().find(|book| book.id == id) else {
            debug!(%id, "book not found for update");
            return Ok(None);
        };
        patch.apply_to(book);
        let updated = book.clone();
        self.write_records(&records).await?;
        info!(%id, "book updated in file store");
        Ok(Some(updated))
    }

    async fn delete(&self, id: BookId) -> Result<Option<Book>> {
        let mut records = self.read_records().await?;
        let Some(position) = records.iter().position(|book| book.id == id) else {
            debug!(%id, "book not found for delete");
            return Ok(None);
        };
        let removed = records.remove(position);
        self.write_records(&records).await?;
        info!(%id, "book deleted from file store");
        Ok(Some(removed))
    }
}
