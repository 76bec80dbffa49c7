use url::Url;

use crate::crawl::config::CrawlConfig;

/// Decides which search result links are worth visiting.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    search_engine_domain: String,
    denied_domains: Vec<String>,
}

impl LinkFilter {
    pub fn new(config: &CrawlConfig) -> Self {
        Self {
            search_engine_domain: config.search_engine_domain.to_lowercase(),
            denied_domains: config
                .denied_domains
                .iter()
                .map(|domain| domain.to_lowercase())
                .collect(),
        }
    }

    /// Absolute http(s) link to a host that is neither the search engine nor denied.
    pub fn is_qualifying(&self, href: &str) -> bool {
        let Ok(url) = Url::parse(href) else {
            return false;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();

        if !self.search_engine_domain.is_empty() && on_domain(&host, &self.search_engine_domain) {
            return false;
        }
        !self
            .denied_domains
            .iter()
            .any(|domain| on_domain(&host, domain))
    }

    pub fn first_qualifying(&self, hrefs: &[String]) -> Option<String> {
        hrefs.iter().find(|href| self.is_qualifying(href)).cloned()
    }

    /// Up to `limit` qualifying links, deduplicated by exact string, in order.
    pub fn unique_qualifying(&self, hrefs: &[String], limit: usize) -> Vec<String> {
        let mut links: Vec<String> = Vec::new();
        for href in hrefs {
            if links.len() >= limit {
                break;
            }
            if self.is_qualifying(href) && !links.contains(href) {
                links.push(href.clone());
            }
        }
        links
    }
}

fn on_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
