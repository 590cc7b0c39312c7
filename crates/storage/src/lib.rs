//! Book catalog storage: one contract, three interchangeable backends.
//!
//! This crate provides a trait-based storage system for book records. The
//! [`BookStore`] trait defines the capability set; implementations cover a
//! PostgreSQL table, a local JSON file, and a remote JSON document on
//! jsonbin.io.

pub mod backends;
pub mod error;
pub mod models;
pub mod traits;

// Re-export the main interface and types for easy access
#[cfg(feature = "postgres")]
pub use backends::PostgresStore;
pub use backends::{JsonBinStore, JsonFileStore};
pub use error::{Result, StoreError};
pub use models::{Book, BookDraft, BookId, BookPatch};
pub use traits::BookStore;
