//! HTTP surface over the crawl orchestrators.
//!
//! | Route | Body | Success |
//! |-------|------|---------|
//! | `POST /scrape` | `{ "query": string }` | `ExtractionResult` |
//! | `POST /scrape-multiple` | `{ "query": string, "numResults"?: number }` | `MultiCrawlOutcome` |
//! | `GET /health` | | `{ "status": "ok", "service": name }` |
//!
//! Failures are `{ "error": message }` with 400 (bad query), 404 (nothing
//! usable found) or 500.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app::{AppContext, Result};

pub fn create_app(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/scrape", post(handlers::scrape_handler))
        .route("/scrape-multiple", post(handlers::scrape_multiple_handler))
        .route("/health", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serve until Ctrl-C.
pub async fn serve(ctx: Arc<AppContext>, addr: &str) -> Result<()> {
    let app = create_app(ctx);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
