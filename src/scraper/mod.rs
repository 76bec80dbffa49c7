//! Browser driver for live page crawling.
//!
//! The crawl code only talks to the [`Browser`] and [`PageSession`] traits;
//! [`ChromeBrowser`] implements them over headless Chrome.
//!
//! # Architecture
//!
//! ```text
//! Browser::new_page → PageSession (one tab per request) → close
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use glean::scraper::{Browser, ChromeBrowser, ScraperConfig};
//!
//! let browser = ChromeBrowser::new(ScraperConfig::default()).await?;
//! let page = browser.new_page().await?;
//! page.navigate("https://example.com", Duration::from_secs(10)).await?;
//! let html = page.html().await?;
//! page.close().await?;
//! ```

mod chrome;
mod config;
#[cfg(test)]
pub(crate) mod testing;

pub use chrome::ChromeBrowser;
pub use config::ScraperConfig;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// A live browser tab, owned by exactly one crawl run.
///
/// Callers must call [`close`](PageSession::close) on every exit path.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate and wait for the page to load, failing after `timeout`
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until `selector` matches at least one element
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Value of attribute `name` on every element matching `selector`, in document order
    async fn attribute_values(&self, selector: &str, name: &str) -> Result<Vec<String>>;

    /// URL the tab currently shows, after redirects
    async fn current_url(&self) -> Result<String>;

    /// Serialized snapshot of the current DOM
    async fn html(&self) -> Result<String>;

    /// Click the first match. Returns `false` when nothing matches.
    async fn click(&self, selector: &str) -> Result<bool>;

    /// Focus the first match and type `text` into it
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Wait for a navigation started by the last interaction
    async fn wait_for_navigation(&self, timeout: Duration) -> Result<()>;

    /// Close the tab
    async fn close(&self) -> Result<()>;
}

/// Source of page sessions.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open a blank tab ready for navigation
    async fn new_page(&self) -> Result<Box<dyn PageSession>>;
}
