//! # glean
//!
//! Turns a natural-language query into the readable text of the most relevant
//! web page, driving a headless browser.
//!
//! ## Architecture
//!
//! ```text
//! Query → classifier → crawl (browser) → extractor → normalizer → JSON
//! ```
//!
//! Weather queries naming a place go to a weather provider first and fall back
//! to ordinary web search when the provider has no page.
//!
//! ## Quick Start
//!
//! ```bash
//! # One page
//! glean scrape "météo à Lyon"
//!
//! # Several pages
//! glean scrape-multiple "rust borrow checker" -n 4
//!
//! # Save a page's text and analyze it
//! glean analyze "actualités france" --out content.txt
//!
//! # HTTP service on :5123
//! glean serve
//! ```

/// Statistics, frequent words, entities and outline of extracted text.
pub mod analysis;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the browser, both
/// orchestrators and the configuration together.
pub mod app;

/// Query classification: weather intent and place extraction.
pub mod classifier;

/// Command-line interface using clap.
///
/// - `serve [--host H] [--port P]` - Run the HTTP service
/// - `scrape <query>` - Print the best page for a query
/// - `scrape-multiple <query> [-n N]` - Print several result pages
/// - `analyze <query> [--out FILE]` - Save a page's text and print an analysis
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/glean/config.toml` or `--config PATH`.
pub mod config;

/// Query-to-content crawling.
///
/// - [`CrawlOrchestrator`](crawl::CrawlOrchestrator): single best page, weather fallback chain
/// - [`MultiCrawlOrchestrator`](crawl::MultiCrawlOrchestrator): several result pages
pub mod crawl;

/// Core domain models.
///
/// - [`Query`](domain::Query): validated, trimmed query text
/// - [`ExtractionResult`](domain::ExtractionResult): one extracted page
/// - [`MultiCrawlOutcome`](domain::MultiCrawlOutcome): results, per-link errors and stats
pub mod domain;

/// Main-content and weather extraction from DOM snapshots.
pub mod extractor;

/// Whitespace normalization and truncation of extracted text.
pub mod normalizer;

/// Headless browser driver.
///
/// - [`Browser`](scraper::Browser) / [`PageSession`](scraper::PageSession): async driver traits
/// - [`ChromeBrowser`](scraper::ChromeBrowser): chromiumoxide implementation
/// - [`ScraperConfig`](scraper::ScraperConfig): launch and resource-blocking options
pub mod scraper;

/// HTTP service built with axum.
pub mod server;
