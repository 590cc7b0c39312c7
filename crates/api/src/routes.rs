//! CRUD routes, instantiated once per storage backend.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use bibliotek_catalog::CatalogService;
use bibliotek_storage::{Book, BookDraft, BookId, BookPatch, BookStore as _};

use crate::error::ApiError;

/// Per-backend routing context.
#[derive(Clone)]
pub struct BackendContext {
    pub catalog: CatalogService,
    /// Whether `POST /` enriches from Open Library when the caller does not
    /// say either way.
    pub enrich_by_default: bool,
}

impl BackendContext {
    pub fn new(catalog: CatalogService, enrich_by_default: bool) -> Self {
        Self {
            catalog,
            enrich_by_default,
        }
    }
}

/// The standard CRUD surface over one backend.
pub fn backend_router(ctx: BackendContext) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(ctx)
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

fn default_limit() -> u64 {
    100
}

#[derive(Debug, Deserialize)]
struct CreateParams {
    #[serde(default)]
    fetch_external: Option<bool>,
}

async fn list_books(
    State(ctx): State<BackendContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    if params.limit == 0 {
        return Err(ApiError::Invalid("limit must be positive".to_string()));
    }
    let books = ctx.catalog.store().list(params.skip, params.limit).await?;
    Ok(Json(books))
}

async fn get_book(
    State(ctx): State<BackendContext>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
    let book = ctx
        .catalog
        .store()
        .get(BookId(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}

async fn create_book(
    State(ctx): State<BackendContext>,
    Query(params): Query<CreateParams>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<Book>, ApiError> {
    let fetch_external = params.fetch_external.unwrap_or(ctx.enrich_by_default);
    let book = ctx.catalog.create_enriched(draft, fetch_external).await?;
    Ok(Json(book))
}

async fn update_book(
    State(ctx): State<BackendContext>,
    Path(id): Path<i64>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>, ApiError> {
    let book = ctx
        .catalog
        .store()
        .update(BookId(id), patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}

async fn delete_book(
    State(ctx): State<BackendContext>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
    let book = ctx
        .catalog
        .store()
        .delete(BookId(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(book))
}
