use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::crawl::{CrawlOrchestrator, MultiCrawlOrchestrator};
use crate::domain::{ExtractionResult, MultiCrawlOutcome, Query};
use crate::extractor::{MainContentExtractor, WeatherExtractor};
use crate::scraper::{Browser, ChromeBrowser};

pub struct AppContext {
    pub config: Config,
    pub crawler: CrawlOrchestrator,
    pub multi_crawler: MultiCrawlOrchestrator,
}

impl AppContext {
    /// Launch Chrome and wire both orchestrators to it.
    pub async fn new(config: Config) -> Result<Self> {
        let browser = ChromeBrowser::new(config.browser.clone()).await?;
        Self::with_browser(config, Arc::new(browser))
    }

    /// Wire the orchestrators to an already running browser.
    ///
    /// Fails if a configured selector does not parse.
    pub fn with_browser(config: Config, browser: Arc<dyn Browser>) -> Result<Self> {
        let crawler = CrawlOrchestrator::new(
            browser.clone(),
            config.crawl.clone(),
            config.weather.clone(),
            MainContentExtractor::new(&config.extraction)?,
            WeatherExtractor::new(&config.weather)?,
        );
        let multi_crawler = MultiCrawlOrchestrator::new(
            browser,
            config.crawl.clone(),
            MainContentExtractor::new(&config.extraction)?,
        );

        Ok(Self {
            config,
            crawler,
            multi_crawler,
        })
    }

    /// Validate `raw` and crawl for the single best page.
    pub async fn scrape(&self, raw: &str) -> Result<ExtractionResult> {
        let query = Query::new(raw)?;
        self.crawler.crawl(&query).await
    }

    /// Validate `raw` and crawl several result pages.
    ///
    /// `num_results` defaults to the configured count and is clamped to the cap.
    pub async fn scrape_multiple(
        &self,
        raw: &str,
        num_results: Option<usize>,
    ) -> Result<MultiCrawlOutcome> {
        let query = Query::new(raw)?;
        let requested = num_results.unwrap_or(self.config.crawl.default_num_results);
        self.multi_crawler.crawl_many(&query, requested).await
    }

    pub fn service_name(&self) -> &str {
        &self.config.server.service_name
    }
}
