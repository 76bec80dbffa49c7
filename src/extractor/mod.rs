//! Main-content extraction from page snapshots.
//!
//! Extraction is a pure function of `(html, url)`: the browser driver hands
//! over the rendered DOM and everything else happens here.
//!
//! ```text
//! snapshot → candidate scan (ContentScorer) → paragraph fallback → normalize
//! ```

mod config;
pub mod dom;
mod main_content;
mod scorer;
mod weather;

pub use config::ExtractionConfig;
pub use main_content::MainContentExtractor;
pub use scorer::ContentScorer;
pub use weather::WeatherExtractor;
