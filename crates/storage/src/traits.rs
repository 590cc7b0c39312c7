//! Trait definition for the book storage contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Book, BookDraft, BookId, BookPatch};

/// Common contract implemented by every catalog backend.
///
/// Each implementation owns an independent record set. Absence of a record is
/// a normal outcome and is reported as `Ok(None)`, never as an error; errors
/// mean the backend itself failed.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetch one book by id.
    ///
    /// # Returns
    /// `Some(book)` if found, `None` if not found
    async fn get(&self, id: BookId) -> Result<Option<Book>>;

    /// List up to `limit` books after skipping the first `skip`, in the
    /// backend's natural storage order. Reflects a snapshot at call time.
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Book>>;

    /// Persist a new book and return the full record including its assigned
    /// id.
    async fn create(&self, draft: BookDraft) -> Result<Book>;

    /// Apply the fields present in `patch` to an existing book.
    ///
    /// Atomic: when the id does not exist, nothing is applied and `None` is
    /// returned.
    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>>;

    /// Remove a book.
    ///
    /// # Returns
    /// The pre-deletion snapshot, or `None` if the id does not exist
    async fn delete(&self, id: BookId) -> Result<Option<Book>>;
}
