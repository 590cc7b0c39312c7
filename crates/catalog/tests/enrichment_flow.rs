//! End-to-end enrichment behavior: a real file-backed store with a mock
//! Open Library server in front of it.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bibliotek_catalog::{CatalogError, CatalogService};
use bibliotek_lookup::OpenLibraryClient;
use bibliotek_storage::{BookDraft, BookStore, JsonFileStore};

fn draft(year: Option<i32>) -> BookDraft {
    BookDraft {
        title: "The Left Hand of Darkness".to_string(),
        author: "Ursula K. Le Guin".to_string(),
        year,
        genre: "Science fiction".to_string(),
        pages: 304,
        available: true,
        cover_url: Some("mine".to_string()),
        description: None,
        rating: None,
    }
}

async fn service(dir: &TempDir, server: &MockServer) -> CatalogService {
    let store = JsonFileStore::new(dir.path().join("books.json"));
    store.initialize().await.unwrap();
    let lookup = OpenLibraryClient::with_base_urls(
        server.uri(),
        format!("{}/covers", server.uri()),
    );
    CatalogService::new(Arc::new(store), Arc::new(lookup))
}

#[tokio::test]
async fn enriched_create_persists_the_merged_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{
                "key": "/works/OL27448W",
                "first_publish_year": 1969,
                "cover_i": 240727,
            }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/works/OL27448W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "An envoy on Gethen.",
            "rating": { "average": 4.06 },
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let catalog = service(&dir, &server).await;

    let book = catalog.create_enriched(draft(Some(2000)), true).await.unwrap();

    // External presentation fields replace the caller's; the caller's year stands.
    assert_eq!(
        book.cover_url.as_deref(),
        Some(format!("{}/covers/id/240727-M.jpg", server.uri()).as_str())
    );
    assert_eq!(book.description.as_deref(), Some("An envoy on Gethen."));
    assert_eq!(book.rating, Some(4.06));
    assert_eq!(book.year, 2000);

    let stored = catalog.store().get(book.id).await.unwrap();
    assert_eq!(stored, Some(book));
}

#[tokio::test]
async fn no_results_behaves_like_a_plain_create() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let catalog = service(&dir, &server).await;

    let enriched = catalog.create_enriched(draft(Some(2000)), true).await.unwrap();
    let plain = catalog.create_enriched(draft(Some(2000)), false).await.unwrap();

    // Identical except for the assigned ids.
    assert_eq!(enriched.title, plain.title);
    assert_eq!(enriched.year, plain.year);
    assert_eq!(enriched.cover_url, plain.cover_url);
    assert_eq!(enriched.description, plain.description);
    assert_eq!(enriched.rating, plain.rating);
    assert_ne!(enriched.id, plain.id);
}

#[tokio::test]
async fn a_lookup_failure_aborts_the_creation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let catalog = service(&dir, &server).await;

    let result = catalog.create_enriched(draft(Some(2000)), true).await;
    assert!(matches!(result.unwrap_err(), CatalogError::Lookup(_)));

    // Nothing was created.
    assert!(catalog.store().list(0, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn external_year_fills_a_draft_without_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "first_publish_year": 1969 }],
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let catalog = service(&dir, &server).await;

    let book = catalog.create_enriched(draft(None), true).await.unwrap();
    assert_eq!(book.year, 1969);
}
