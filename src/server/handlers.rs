use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::{AppContext, GleanError};
use crate::domain::{ExtractionResult, MultiCrawlOutcome};
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiScrapeRequest {
    pub query: Option<String>,
    /// Any JSON number; fractions are truncated and out-of-range values clamped
    pub num_results: Option<f64>,
}

fn required_query(query: Option<String>) -> Result<String, ApiError> {
    query.ok_or_else(|| ApiError(GleanError::InvalidQuery("query is required".to_string())))
}

/// POST /scrape - Content of the single best page for a query
pub async fn scrape_handler(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(request) = payload?;
    let query = required_query(request.query)?;

    let result = ctx.scrape(&query).await?;
    Ok(Json(result))
}

/// POST /scrape-multiple - Content of several result pages for a query
pub async fn scrape_multiple_handler(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<MultiScrapeRequest>, JsonRejection>,
) -> Result<Json<MultiCrawlOutcome>, ApiError> {
    let Json(request) = payload?;
    let query = required_query(request.query)?;
    // saturating: negatives and NaN become 0, then clamp to at least 1
    let num_results = request.num_results.map(|n| n as usize);

    let outcome = ctx.scrape_multiple(&query, num_results).await?;
    Ok(Json(outcome))
}

/// GET /health
pub async fn health_handler(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({ "status": "ok", "service": ctx.service_name() }))
}
