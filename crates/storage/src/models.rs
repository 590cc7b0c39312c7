//! Book record types shared by every storage backend.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Unique identifier for a book within one backend's record set.
///
/// Assigned by the backend on creation and immutable afterwards. Ids are
/// meaningful only within the backend that issued them; the three backends
/// hold parallel, non-overlapping catalogs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl BookId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub pages: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

fn default_available() -> bool {
    true
}

/// Payload for creating a book.
///
/// `year` may be left out when the caller expects enrichment to supply it; a
/// draft that still has no year when it reaches a backend is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub genre: String,
    pub pages: i32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl BookDraft {
    /// Check the draft before it touches a backend.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::InvalidBook {
                message: "title cannot be empty".to_string(),
            });
        }
        if self.author.trim().is_empty() {
            return Err(StoreError::InvalidBook {
                message: "author cannot be empty".to_string(),
            });
        }
        if self.year.is_none() {
            return Err(StoreError::InvalidBook {
                message: "year is required".to_string(),
            });
        }
        if self.pages <= 0 {
            return Err(StoreError::InvalidBook {
                message: "pages must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Turn a validated draft into a full record with the given id.
    pub fn into_book(self, id: BookId) -> Result<Book> {
        let year = self.year.ok_or_else(|| StoreError::InvalidBook {
            message: "year is required".to_string(),
        })?;
        Ok(Book {
            id,
            title: self.title,
            author: self.author,
            year,
            genre: self.genre,
            pages: self.pages,
            available: self.available,
            cover_url: self.cover_url,
            description: self.description,
            rating: self.rating,
        })
    }
}

/// Partial update payload; absent fields leave the stored record untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub pages: Option<i32>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl BookPatch {
    /// Check the patch before it touches a backend.
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(StoreError::InvalidBook {
                message: "title cannot be empty".to_string(),
            });
        }
        if self.author.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(StoreError::InvalidBook {
                message: "author cannot be empty".to_string(),
            });
        }
        if self.pages.is_some_and(|p| p <= 0) {
            return Err(StoreError::InvalidBook {
                message: "pages must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Apply every present field to `book`, leaving the id alone.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(genre) = &self.genre {
            book.genre = genre.clone();
        }
        if let Some(pages) = self.pages {
            book.pages = pages;
        }
        if let Some(available) = self.available {
            book.available = available;
        }
        if let Some(cover_url) = &self.cover_url {
            book.cover_url = Some(cover_url.clone());
        }
        if let Some(description) = &self.description {
            book.description = Some(description.clone());
        }
        if let Some(rating) = self.rating {
            book.rating = Some(rating);
        }
    }
}
