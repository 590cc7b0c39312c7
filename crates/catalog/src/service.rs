//! The enrichment orchestrator and its merge policy.

use std::sync::Arc;

use tracing::{debug, info};

use bibliotek_lookup::{BookInfo, OpenLibraryClient};
use bibliotek_storage::{Book, BookDraft, BookStore};

use crate::error::Result;

/// Orchestrates record creation over one storage backend, optionally merging
/// in data from Open Library first.
///
/// The service is cheap to clone and safe to share across request handlers.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    lookup: Arc<OpenLibraryClient>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>, lookup: Arc<OpenLibraryClient>) -> Self {
        Self { store, lookup }
    }

    /// The underlying store, for plain non-enriching operations.
    pub fn store(&self) -> &dyn BookStore {
        self.store.as_ref()
    }

    /// Create a book, optionally merging in external bibliographic data.
    ///
    /// A lookup failure aborts the creation entirely; a lookup with no
    /// results does not, and the caller's fields are stored as-is.
    pub async fn create_enriched(
        &self,
        mut draft: BookDraft,
        fetch_external: bool,
    ) -> Result<Book> {
        if fetch_external {
            match self
                .lookup
                .search(&draft.title, Some(&draft.author))
                .await?
            {
                Some(external) => {
                    debug!(title = %draft.title, "merging external book data");
                    apply_enrichment(&mut draft, external);
                }
                None => debug!(title = %draft.title, "no external data found"),
            }
        }

        let book = self.store.create(draft).await?;
        info!(id = %book.id, title = %book.title, "book created");
        Ok(book)
    }
}

/// Merge external data into a draft.
///
/// `cover_url`, `description` and `rating` are taken from the external record
/// whenever it has them, replacing whatever the caller supplied; the caller's
/// values for those three are defaults, not overrides. `year` is the
/// exception: it is filled from `first_publish_year` only when the draft has
/// no year of its own.
pub fn apply_enrichment(draft: &mut BookDraft, external: BookInfo) {
    if let Some(cover_url) = external.cover_url {
        draft.cover_url = Some(cover_url);
    }
    if let Some(description) = external.description {
        draft.description = Some(description);
    }
    if let Some(rating) = external.rating {
        draft.rating = Some(rating);
    }
    if draft.year.is_none() {
        draft.year = external.first_publish_year;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookDraft {
        BookDraft {
            title: "X".to_string(),
            author: "Y".to_string(),
            year: Some(2000),
            genre: "Fiction".to_string(),
            pages: 100,
            available: true,
            cover_url: None,
            description: None,
            rating: None,
        }
    }

    #[test]
    fn external_presentation_fields_win_even_over_caller_values() {
        let mut d = draft();
        d.cover_url = Some("mine".to_string());
        let external = BookInfo {
            cover_url: Some("theirs".to_string()),
            first_publish_year: Some(1990),
            ..BookInfo::default()
        };

        apply_enrichment(&mut d, external);

        assert_eq!(d.cover_url.as_deref(), Some("theirs"));
        // The caller's year stands; first_publish_year only fills a gap.
        assert_eq!(d.year, Some(2000));
    }

    #[test]
    fn year_is_filled_only_when_absent() {
        let mut d = draft();
        d.year = None;
        let external = BookInfo {
            first_publish_year: Some(1990),
            ..BookInfo::default()
        };

        apply_enrichment(&mut d, external);

        assert_eq!(d.year, Some(1990));
    }

    #[test]
    fn absent_external_fields_leave_the_draft_alone() {
        let mut d = draft();
        d.cover_url = Some("mine".to_string());
        d.rating = Some(3.0);

        apply_enrichment(&mut d, BookInfo::default());

        assert_eq!(d.cover_url.as_deref(), Some("mine"));
        assert_eq!(d.rating, Some(3.0));
        assert_eq!(d.year, Some(2000));
    }

    #[test]
    fn description_and_rating_overwrite_caller_values() {
        let mut d = draft();
        d.description = Some("caller text".to_string());
        d.rating = Some(1.0);
        let external = BookInfo {
            description: Some("external text".to_string()),
            rating: Some(4.5),
            ..BookInfo::default()
        };

        apply_enrichment(&mut d, external);

        assert_eq!(d.description.as_deref(), Some("external text"));
        assert_eq!(d.rating, Some(4.5));
    }
}
