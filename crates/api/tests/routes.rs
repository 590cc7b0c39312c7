//! Handler behavior over the file backend: status mapping and round trips.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bibliotek_api::create_router;
use bibliotek_api::routes::BackendContext;
use bibliotek_catalog::CatalogService;
use bibliotek_lookup::OpenLibraryClient;
use bibliotek_storage::JsonFileStore;

/// Router with a file backend behind every mount, lookups pointed at `server`.
async fn test_app(dir: &TempDir, server: &MockServer) -> Router {
    let lookup = Arc::new(OpenLibraryClient::with_base_urls(
        server.uri(),
        format!("{}/covers", server.uri()),
    ));
    let context = |name: &str| {
        let store = JsonFileStore::new(dir.path().join(format!("{name}.json")));
        BackendContext::new(CatalogService::new(Arc::new(store), lookup.clone()), false)
    };
    let app = create_router(context("db"), context("file"), context("bin"));
    for name in ["db", "file", "bin"] {
        let store = JsonFileStore::new(dir.path().join(format!("{name}.json")));
        store.initialize().await.unwrap();
    }
    app
}

fn draft_body() -> Value {
    json!({
        "title": "The Left Hand of Darkness",
        "author": "Ursula K. Le Guin",
        "year": 1969,
        "genre": "Science fiction",
        "pages": 304,
    })
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_book_maps_to_404() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    let response = app.oneshot(get("/file-books/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "book not found" })
    );
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    let response = app
        .clone()
        .oneshot(post("/file-books/", draft_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["available"], json!(true));

    let response = app.oneshot(get("/file-books/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn invalid_draft_maps_to_422() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    let mut body = draft_body();
    body["title"] = json!("   ");
    let response = app.oneshot(post("/file-books/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn zero_limit_maps_to_422() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    let response = app
        .oneshot(get("/file-books/?skip=0&limit=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_and_delete_flow() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    app.clone()
        .oneshot(post("/file-books/", draft_body()))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(put("/file-books/1", json!({ "available": false, "rating": 4.5 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["available"], json!(false));
    assert_eq!(updated["rating"], json!(4.5));
    assert_eq!(updated["title"], json!("The Left Hand of Darkness"));

    let response = app
        .clone()
        .oneshot(delete("/file-books/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/file-books/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_are_windowed() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let app = test_app(&dir, &server).await;

    for _ in 0..3 {
        app.clone()
            .oneshot(post("/file-books/", draft_body()))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(get("/file-books/?skip=1&limit=1"))
        .await
        .unwrap();
    let window = json_body(response).await;

    assert_eq!(window.as_array().unwrap().len(), 1);
    assert_eq!(window[0]["id"], json!(2));
}

#[tokio::test]
async fn create_can_opt_into_enrichment() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "cover_i": 240727 }],
        })))
        .mount(&server)
        .await;
    let app = test_app(&dir, &server).await;

    let response = app
        .oneshot(post("/file-books/?fetch_external=true", draft_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(
        created["cover_url"],
        json!(format!("{}/covers/id/240727-M.jpg", server.uri()))
    );
}
