//! HTTP layer for the bibliotek catalog service.
//!
//! Three parallel routers expose the same CRUD surface over the relational,
//! file, and jsonbin backends. Backends are constructed once at startup and
//! injected into router state; the handlers only translate between HTTP and
//! the domain.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use eyre::WrapErr as _;
use tower_http::trace::TraceLayer;
use tracing::info;

use bibliotek_catalog::CatalogService;
use bibliotek_lookup::OpenLibraryClient;
use bibliotek_storage::{BookStore, JsonBinStore, JsonFileStore, PostgresStore};

use crate::config::Settings;
use crate::routes::{BackendContext, backend_router};

/// Assemble the application router from per-backend contexts.
pub fn create_router(
    relational: BackendContext,
    file: BackendContext,
    jsonbin: BackendContext,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/books", backend_router(relational))
        .nest("/file-books", backend_router(file))
        .nest("/jsonbin-books", backend_router(jsonbin))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Construct every backend from settings and serve until shutdown.
pub async fn serve(settings: Settings) -> eyre::Result<()> {
    let lookup = Arc::new(OpenLibraryClient::with_base_urls(
        &settings.open_library.base_url,
        &settings.open_library.covers_url,
    ));

    let relational = PostgresStore::connect(&settings.database.url)
        .await
        .wrap_err("failed to connect to the database")?;

    let file_store = JsonFileStore::new(&settings.file_store.path);
    file_store
        .initialize()
        .await
        .wrap_err("failed to initialize the catalog file")?;

    let bin_store = JsonBinStore::new(
        &settings.jsonbin.base_url,
        &settings.jsonbin.bin_id,
        &settings.jsonbin.api_key,
    );

    let context = |store: Arc<dyn BookStore>, enrich_by_default: bool| {
        BackendContext::new(CatalogService::new(store, lookup.clone()), enrich_by_default)
    };

    // The relational path enriches new records unless told otherwise; the
    // file and jsonbin paths only enrich on request.
    let app = create_router(
        context(Arc::new(relational), true),
        context(Arc::new(file_store), false),
        context(Arc::new(bin_store), false),
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(%err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
