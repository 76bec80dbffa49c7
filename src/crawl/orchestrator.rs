use std::sync::Arc;

use crate::app::{GleanError, Result};
use crate::classifier::{classify, QueryIntent};
use crate::config::WeatherConfig;
use crate::crawl::config::CrawlConfig;
use crate::crawl::links::LinkFilter;
use crate::crawl::{extract_target, search_result_links, weather, PageGuard};
use crate::domain::{ExtractionResult, Query};
use crate::extractor::{MainContentExtractor, WeatherExtractor};
use crate::scraper::{Browser, PageSession};

/// Steps of a single-result crawl.
///
/// ```text
/// Start ─┬─ WeatherPath ─┬─────────────── Extracted → Done
///        │               └─ WeatherFailed ─┐
///        └──────────────────── GenericPath ┴─ Extracted → Done
/// ```
#[derive(Debug)]
pub enum CrawlState {
    Start,
    WeatherPath { city: String },
    /// The provider chain failed; the error is logged, never returned
    WeatherFailed(GleanError),
    GenericPath,
    Extracted(ExtractionResult),
}

impl CrawlState {
    /// Path taken out of `Start` for a classified query.
    pub fn after_start(intent: &QueryIntent, weather_enabled: bool) -> Self {
        match &intent.city {
            Some(city) if intent.is_weather && weather_enabled => {
                CrawlState::WeatherPath { city: city.clone() }
            }
            _ => CrawlState::GenericPath,
        }
    }
}

/// Resolves a query to the content of one page.
pub struct CrawlOrchestrator {
    browser: Arc<dyn Browser>,
    crawl: CrawlConfig,
    weather: WeatherConfig,
    links: LinkFilter,
    extractor: MainContentExtractor,
    weather_extractor: WeatherExtractor,
}

impl CrawlOrchestrator {
    pub fn new(
        browser: Arc<dyn Browser>,
        crawl: CrawlConfig,
        weather: WeatherConfig,
        extractor: MainContentExtractor,
        weather_extractor: WeatherExtractor,
    ) -> Self {
        let links = LinkFilter::new(&crawl);
        Self {
            browser,
            crawl,
            weather,
            links,
            extractor,
            weather_extractor,
        }
    }

    /// Crawl for `query`. The tab is closed whatever the outcome.
    pub async fn crawl(&self, query: &Query) -> Result<ExtractionResult> {
        let intent = classify(query.as_str());
        tracing::info!(
            "Crawling {:?} (weather: {}, city: {:?})",
            query.as_str(),
            intent.is_weather,
            intent.city
        );

        let page = PageGuard::new(self.browser.new_page().await?);
        let outcome = self.run(page.session(), query, &intent).await;
        page.close().await;

        if let Err(ref e) = outcome {
            tracing::warn!("Crawl for {:?} failed: {}", query.as_str(), e);
        }
        outcome
    }

    async fn run(
        &self,
        page: &dyn PageSession,
        query: &Query,
        intent: &QueryIntent,
    ) -> Result<ExtractionResult> {
        let mut state = CrawlState::Start;
        loop {
            state = match state {
                CrawlState::Start => CrawlState::after_start(intent, self.weather.enabled),
                CrawlState::WeatherPath { city } => {
                    match weather::provider_page(
                        page,
                        &self.weather,
                        &self.weather_extractor,
                        &city,
                        self.crawl.settle_delay(),
                    )
                    .await
                    {
                        Ok(result) => CrawlState::Extracted(result),
                        Err(e) => CrawlState::WeatherFailed(e),
                    }
                }
                CrawlState::WeatherFailed(e) => {
                    tracing::warn!("Weather provider failed, falling back to search: {}", e);
                    CrawlState::GenericPath
                }
                CrawlState::GenericPath => {
                    CrawlState::Extracted(self.generic_path(page, query).await?)
                }
                CrawlState::Extracted(result) => return Ok(result),
            };
        }
    }

    async fn generic_path(&self, page: &dyn PageSession, query: &Query) -> Result<ExtractionResult> {
        let hrefs = search_result_links(page, &self.crawl, query).await?;
        let target = self.links.first_qualifying(&hrefs).ok_or_else(|| {
            GleanError::NoResultsFound(format!("no usable result link for {:?}", query.as_str()))
        })?;
        extract_target(page, &target, &self.crawl, &self.extractor).await
    }
}
