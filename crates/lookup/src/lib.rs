//! Open Library lookup client for book enrichment.
//!
//! A thin, typed client for the two Open Library endpoints the catalog
//! touches: title/author search and per-work details. The output is a
//! [`BookInfo`] with whatever fields the API had; partial data is normal.

pub mod client;
mod dto;
pub mod error;

pub use client::{BookInfo, OpenLibraryClient};
pub use error::{LookupError, Result};
