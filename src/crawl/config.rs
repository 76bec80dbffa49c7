use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Search engine and navigation settings shared by both crawl modes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Results page URL; `{query}` is replaced by the percent-encoded query
    pub search_url_template: String,

    /// Links back to this domain (or its subdomains) are never followed
    pub search_engine_domain: String,

    /// Selector for candidate result links on the results page
    pub result_link_selector: String,

    /// Low-value hosts skipped when picking result links (subdomains included)
    pub denied_domains: Vec<String>,

    /// Timeout for loading the results page and waiting for links (default: 10)
    pub search_timeout_secs: u64,

    /// Timeout for loading a third-party result page (default: 30)
    pub target_timeout_secs: u64,

    /// Pause after loading a result page for client-side rendering (default: 2000)
    pub settle_delay_ms: u64,

    /// Hard ceiling on links visited by a multi-result crawl (default: 5)
    pub max_results_cap: usize,

    /// Links visited by a multi-result crawl when the caller does not say (default: 3)
    pub default_num_results: usize,

    /// Per-result content ceiling in multi-result mode, in characters (default: 5000)
    pub content_char_limit: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            search_url_template: "https://search.brave.com/search?q={query}".to_string(),
            search_engine_domain: "brave.com".to_string(),
            result_link_selector: "a[href^=\"http\"]:not([href*=\"brave.com\"])".to_string(),
            denied_domains: vec![
                "youtube.com".to_string(),
                "youtu.be".to_string(),
                "facebook.com".to_string(),
                "instagram.com".to_string(),
                "twitter.com".to_string(),
                "x.com".to_string(),
                "tiktok.com".to_string(),
                "dailymotion.com".to_string(),
            ],
            search_timeout_secs: 10,
            target_timeout_secs: 30,
            settle_delay_ms: 2000,
            max_results_cap: 5,
            default_num_results: 3,
            content_char_limit: 5000,
        }
    }
}

impl CrawlConfig {
    /// Results page URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.search_url_template.replace("{query}", &encoded)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn target_timeout(&self) -> Duration {
        Duration::from_secs(self.target_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Clamp a requested result count to `1..=max_results_cap`.
    pub fn clamp_results(&self, requested: usize) -> usize {
        requested.clamp(1, self.max_results_cap.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.search_url("météo à Lyon"),
            "https://search.brave.com/search?q=m%C3%A9t%C3%A9o+%C3%A0+Lyon"
        );
    }

    #[test]
    fn test_target_timeout_longer_than_search() {
        let config = CrawlConfig::default();
        assert!(config.target_timeout() > config.search_timeout());
        assert_eq!(config.settle_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_clamp_results() {
        let config = CrawlConfig::default();
        assert_eq!(config.clamp_results(0), 1);
        assert_eq!(config.clamp_results(3), 3);
        assert_eq!(config.clamp_results(100), 5);

        let degenerate = CrawlConfig {
            max_results_cap: 0,
            ..Default::default()
        };
        assert_eq!(degenerate.clamp_results(4), 1);
    }
}
