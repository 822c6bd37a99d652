//! HTTP surface for the catalog and review board.
//!
//! The presentation layer (page layout, widgets, toasts) lives elsewhere;
//! this is the interface it requires from the core: a movie list with
//! trending-to-default fallback, title search, best-effort detail, and the
//! review read/submit flow. Upstream failures never become 5xx responses;
//! they surface as an empty list plus a user-visible notice in the envelope.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::reviews::ReviewStore;

pub mod routes_api;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<CatalogClient>,
    pub reviews: Arc<ReviewStore>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Build the application context from config and serve until ctrl-c.
pub async fn start_server(config: Config) -> Result<()> {
    let store_path: PathBuf = config.reviews.path.clone();
    let reviews = ReviewStore::open(&store_path)
        .with_context(|| format!("Failed to open review store at {:?}", store_path))?;

    let ctx = AppContext {
        catalog: Arc::new(CatalogClient::from_config(&config)),
        reviews: Arc::new(reviews),
        config: Arc::new(config),
    };

    let addr = format!("{}:{}", ctx.config.server.host, ctx.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, create_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
