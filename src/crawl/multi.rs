use std::sync::Arc;

use crate::app::{GleanError, Result};
use crate::crawl::config::CrawlConfig;
use crate::crawl::links::LinkFilter;
use crate::crawl::{extract_target, search_result_links, PageGuard};
use crate::domain::{CrawlStats, LinkError, MultiCrawlOutcome, Query};
use crate::extractor::MainContentExtractor;
use crate::normalizer::truncate;
use crate::scraper::{Browser, PageSession};

/// Crawls several search results for one query, one page at a time.
///
/// A failing page is recorded in `errors` and the batch moves on.
pub struct MultiCrawlOrchestrator {
    browser: Arc<dyn Browser>,
    crawl: CrawlConfig,
    links: LinkFilter,
    extractor: MainContentExtractor,
}

impl MultiCrawlOrchestrator {
    pub fn new(browser: Arc<dyn Browser>, crawl: CrawlConfig, extractor: MainContentExtractor) -> Self {
        let links = LinkFilter::new(&crawl);
        Self {
            browser,
            crawl,
            links,
            extractor,
        }
    }

    /// Crawl up to `max_results` distinct result pages (never more than the
    /// configured ceiling).
    pub async fn crawl_many(&self, query: &Query, max_results: usize) -> Result<MultiCrawlOutcome> {
        let requested = self.crawl.clamp_results(max_results);
        tracing::info!(
            "Multi-crawl {:?}: {} requested, {} allowed",
            query.as_str(),
            max_results,
            requested
        );

        let page = PageGuard::new(self.browser.new_page().await?);
        let outcome = self.run(page.session(), query, requested).await;
        page.close().await;
        outcome
    }

    async fn run(
        &self,
        page: &dyn PageSession,
        query: &Query,
        requested: usize,
    ) -> Result<MultiCrawlOutcome> {
        let hrefs = search_result_links(page, &self.crawl, query).await?;
        let links = self.links.unique_qualifying(&hrefs, requested);
        if links.is_empty() {
            return Err(GleanError::NoResultsFound(format!(
                "no usable result link for {:?}",
                query.as_str()
            )));
        }

        let mut results = Vec::with_capacity(links.len());
        let mut errors = Vec::new();

        for url in &links {
            match extract_target(page, url, &self.crawl, &self.extractor).await {
                Ok(mut result) => {
                    result.content = truncate(&result.content, self.crawl.content_char_limit);
                    results.push(result);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    errors.push(LinkError {
                        url: url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let stats = CrawlStats {
            requested,
            found: links.len(),
            successful: results.len(),
        };
        tracing::info!(
            "Multi-crawl {:?} done: {}/{} pages extracted",
            query.as_str(),
            stats.successful,
            stats.found
        );

        Ok(MultiCrawlOutcome {
            results,
            errors,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::fixtures::{article_page, crawl_config, results_page, search_url};
    use crate::extractor::ExtractionConfig;
    use crate::scraper::testing::FakeBrowser;

    fn orchestrator(browser: &FakeBrowser, crawl: CrawlConfig) -> MultiCrawlOrchestrator {
        MultiCrawlOrchestrator::new(
            Arc::new(browser.clone()),
            crawl,
            MainContentExtractor::new(&ExtractionConfig::default()).unwrap(),
        )
    }

    fn query(raw: &str) -> Query {
        Query::new(raw).unwrap()
    }

    fn many_results(n: usize) -> (Vec<String>, FakeBrowser) {
        let links: Vec<String> = (0..n).map(|i| format!("https://site{i}.example/")).collect();
        let refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let mut browser = FakeBrowser::new().page(&search_url("actualités"), &results_page(&refs));
        for (i, link) in links.iter().enumerate() {
            browser = browser.page(link, &article_page(&format!("Page {i}"), 30));
        }
        (links, browser)
    }

    #[tokio::test]
    async fn test_never_visits_more_than_cap() {
        let (_, browser) = many_results(8);

        let outcome = orchestrator(&browser, crawl_config())
            .crawl_many(&query("actualités"), 100)
            .await
            .unwrap();

        // one search page plus at most five results
        assert_eq!(browser.visits().len(), 6);
        assert_eq!(outcome.stats.requested, 5);
        assert_eq!(outcome.stats.found, 5);
        assert_eq!(outcome.stats.successful, 5);
        assert_eq!(outcome.results.len() + outcome.errors.len(), 5);
    }

    #[tokio::test]
    async fn test_dedups_links() {
        let browser = FakeBrowser::new()
            .page(
                &search_url("doublons"),
                &results_page(&[
                    "https://a.example/",
                    "https://a.example/",
                    "https://b.example/",
                ]),
            )
            .page("https://a.example/", &article_page("A", 25))
            .page("https://b.example/", &article_page("B", 25));

        let outcome = orchestrator(&browser, crawl_config())
            .crawl_many(&query("doublons"), 5)
            .await
            .unwrap();

        assert_eq!(outcome.stats.found, 2);
        let titles: Vec<_> = outcome.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_failed_page_does_not_abort_batch() {
        let browser = FakeBrowser::new()
            .page(
                &search_url("mixte"),
                &results_page(&[
                    "https://ok.example/1",
                    "https://timeout.example/",
                    "https://ok.example/2",
                ]),
            )
            .page("https://ok.example/1", &article_page("Un", 25))
            .failing("https://timeout.example/", "Navigation timed out after 30000ms")
            .page("https://ok.example/2", &article_page("Deux", 25));

        let outcome = orchestrator(&browser, crawl_config())
            .crawl_many(&query("mixte"), 3)
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].url, "https://timeout.example/");
        assert!(outcome.errors[0].error.contains("timed out"));
        assert_eq!(outcome.stats.successful, 2);
        assert_eq!(outcome.stats.found, 3);
        assert_eq!(browser.closed(), 1);
    }

    #[tokio::test]
    async fn test_truncates_long_content() {
        let browser = FakeBrowser::new()
            .page(&search_url("long"), &results_page(&["https://long.example/"]))
            .page("https://long.example/", &article_page("Long", 3000));
        let crawl = CrawlConfig {
            content_char_limit: 100,
            ..crawl_config()
        };

        let outcome = orchestrator(&browser, crawl)
            .crawl_many(&query("long"), 1)
            .await
            .unwrap();

        let content = &outcome.results[0].content;
        assert_eq!(content.chars().count(), 103);
        assert!(content.ends_with("..."));
        assert!(outcome.results[0].full_page_content.chars().count() > 100);
    }

    #[tokio::test]
    async fn test_cancelled_batch_closes_its_page() {
        let (_, browser) = many_results(3);
        let crawl = CrawlConfig {
            settle_delay_ms: 5_000,
            ..crawl_config()
        };
        let orchestrator = orchestrator(&browser, crawl);

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            orchestrator.crawl_many(&query("actualités"), 3),
        )
        .await;

        assert!(outcome.is_err(), "batch should still be settling");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(browser.opened(), 1);
        assert_eq!(browser.closed(), 1);
    }

    #[tokio::test]
    async fn test_no_links_is_not_found() {
        let browser = FakeBrowser::new().page(
            &search_url("rien"),
            &results_page(&["https://www.tiktok.com/@rien"]),
        );

        let err = orchestrator(&browser, crawl_config())
            .crawl_many(&query("rien"), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, GleanError::NoResultsFound(_)));
        assert_eq!(browser.closed(), 1);
    }
}
