//! Query-to-content crawling.
//!
//! # Architecture
//!
//! ```text
//! Query → classify → CrawlOrchestrator ─┬─ weather provider ─┐
//!                                       └─ search results ───┴→ extract
//! Query → MultiCrawlOrchestrator → search results → N pages → extract each
//! ```
//!
//! Both orchestrators open one tab per run and close it on every exit path.

mod config;
mod links;
mod multi;
mod orchestrator;
mod weather;

pub use config::CrawlConfig;
pub use links::LinkFilter;
pub use multi::MultiCrawlOrchestrator;
pub use orchestrator::{CrawlOrchestrator, CrawlState};
pub use weather::city_slug;

use std::sync::Arc;

use crate::app::{GleanError, Result};
use crate::domain::{ExtractionResult, Query};
use crate::extractor::MainContentExtractor;
use crate::scraper::PageSession;

/// Load the results page for `query` and return every candidate link's `href`.
///
/// A results page that does not load, or shows no result link in time, is
/// reported as [`GleanError::NoResultsFound`].
pub(crate) async fn search_result_links(
    page: &dyn PageSession,
    config: &CrawlConfig,
    query: &Query,
) -> Result<Vec<String>> {
    let search_url = config.search_url(query.as_str());
    tracing::info!("Searching: {}", search_url);

    page.navigate(&search_url, config.search_timeout())
        .await
        .map_err(|e| GleanError::NoResultsFound(format!("search page for {:?}: {}", query.as_str(), e)))?;

    page.wait_for_selector(&config.result_link_selector, config.search_timeout())
        .await
        .map_err(|_| {
            GleanError::NoResultsFound(format!("no result link for {:?}", query.as_str()))
        })?;

    let hrefs = page
        .attribute_values(&config.result_link_selector, "href")
        .await?;
    tracing::debug!("{} candidate result links", hrefs.len());
    Ok(hrefs)
}

/// Visit a result page, let it settle, and extract its main content.
pub(crate) async fn extract_target(
    page: &dyn PageSession,
    url: &str,
    config: &CrawlConfig,
    extractor: &MainContentExtractor,
) -> Result<ExtractionResult> {
    tracing::info!("Visiting: {}", url);
    page.navigate(url, config.target_timeout())
        .await
        .map_err(|e| GleanError::TargetUnreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    tokio::time::sleep(config.settle_delay()).await;

    let html = page
        .html()
        .await
        .map_err(|e| GleanError::ExtractionFailure(e.to_string()))?;
    let final_url = match page.current_url().await {
        Ok(landed) if !landed.is_empty() => landed,
        _ => url.to_string(),
    };

    let result = extractor.extract(&html, &final_url);
    tracing::info!(
        "Extracted {} chars from {} ({} chars full page)",
        result.content.chars().count(),
        final_url,
        result.full_page_content.chars().count()
    );
    Ok(result)
}

/// Owns the tab of one crawl run and closes it on every exit path.
///
/// [`close`](PageGuard::close) is the normal exit. A guard dropped before
/// that, because the run was cancelled or timed out, closes the tab on a
/// spawned task.
pub(crate) struct PageGuard {
    page: Arc<dyn PageSession>,
    closed: bool,
}

impl PageGuard {
    pub(crate) fn new(page: Box<dyn PageSession>) -> Self {
        Self {
            page: Arc::from(page),
            closed: false,
        }
    }

    pub(crate) fn session(&self) -> &dyn PageSession {
        self.page.as_ref()
    }

    /// Close the tab, logging instead of failing.
    pub(crate) async fn close(mut self) {
        if let Err(e) = self.page.close().await {
            tracing::warn!("Failed to close page: {}", e);
        }
        self.closed = true;
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let page = self.page.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                tracing::debug!("Crawl cancelled, closing its page");
                runtime.spawn(async move {
                    if let Err(e) = page.close().await {
                        tracing::warn!("Failed to close abandoned page: {}", e);
                    }
                });
            }
            Err(_) => tracing::warn!("Page dropped outside a runtime, left open"),
        }
    }
}
