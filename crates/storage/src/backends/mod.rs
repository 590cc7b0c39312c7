//! Backend implementations for the book storage contract.
//!
//! Three interchangeable backends: a local JSON file, a remote jsonbin.io
//! document, and a PostgreSQL table (behind the `postgres` feature).

pub mod file;
pub mod jsonbin;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use file::JsonFileStore;
pub use jsonbin::JsonBinStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use crate::models::{Book, BookId};

/// Next id for backends that assign ids themselves: one past the highest
/// existing id, starting at 1 for an empty set.
pub(crate) fn next_id(records: &[Book]) -> BookId {
    BookId(records.iter().map(|book| book.id.0).max().unwrap_or(0) + 1)
}
