//! Configuration management.
//!
//! Configuration is read from `~/.config/glean/config.toml` (or `--config PATH`)
//! at startup. If the default file doesn't exist, one with comments is created.

pub mod server;
pub mod weather;

pub use server::ServerConfig;
pub use weather::WeatherConfig;

use crate::crawl::CrawlConfig;
use crate::extractor::ExtractionConfig;
use crate::scraper::ScraperConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub browser: ScraperConfig,
    pub crawl: CrawlConfig,
    pub extraction: ExtractionConfig,
    pub weather: WeatherConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used and
    /// created with commented defaults if missing. Missing fields use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    tracing::info!("Created default config at {}", default_path.display());
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path: `~/.config/glean/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("glean").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    pub fn default_config_content() -> String {
        r##"# glean configuration
#
# Every key is optional; missing keys fall back to the values shown here.
# Selectors are CSS selectors. A selector may list alternatives separated
# by commas.

[server]
host = "0.0.0.0"
# Also settable with the PORT environment variable
port = 5123
service_name = "glean"

[browser]
# Run Chrome without a visible window
headless = true

# Maximum open tabs (one per request)
max_concurrency = 5

# Resources not fetched by the browser
block_images = true
block_stylesheets = true
block_fonts = true
block_media = true

user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"

[crawl]
# {query} is replaced by the percent-encoded query
search_url_template = "https://search.brave.com/search?q={query}"
search_engine_domain = "brave.com"
result_link_selector = 'a[href^="http"]:not([href*="brave.com"])'

# Result links on these hosts (or their subdomains) are skipped
denied_domains = [
    "youtube.com",
    "youtu.be",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "tiktok.com",
    "dailymotion.com",
]

search_timeout_secs = 10
target_timeout_secs = 30

# Pause after a result page loads, for client-side rendering (milliseconds)
settle_delay_ms = 2000

# scrape-multiple: ceiling, default count and per-result content limit
max_results_cap = 5
default_num_results = 3
content_char_limit = 5000

[extraction]
# Candidate main-content containers; every match is scored
content_selectors = [
    "article",
    "main",
    '[role="main"]',
    ".content",
    "#content",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".post",
    ".article",
    ".main-content",
    "#main-content",
]

# Regions with fewer words score zero
min_words = 20

# Paragraph fallback: a parent needs more than min_paragraphs paragraphs
# longer than min_paragraph_chars characters
min_paragraph_chars = 50
min_paragraphs = 3

[weather]
# Try the weather provider first for weather queries
enabled = true
base_url = "https://meteofrance.com"
# {slug} is replaced by the city slug
forecast_path = "/previsions-meteo-france/{slug}"

# A forecast page is missing when the final URL contains the marker
# or the page text contains one of the phrases
not_found_marker = "/404"
not_found_phrases = ["page introuvable", "cette page n'existe pas", "aucun résultat"]

cookie_button_selector = "#didomi-notice-agree-button"
search_input_selector = 'input[type="search"], #search-input'
suggestion_selector = ".autocomplete-result a, .search-results li a"
timeout_secs = 15

temperature_selector = ".weather_temp, .today .temperature"
summary_selector = ".weather_summary, .today .summary"
forecast_selector = ".daily-forecast, .forecast-days"
precipitation_selector = ".rain-forecast, .precipitation"
bulletin_selector = ".bulletin, .weather-bulletin"

container_selectors = ["#main-content", ".weather-container", "main"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");
        let defaults = Config::default();

        assert_eq!(config.server.port, 5123);
        assert_eq!(config.browser.user_agent, defaults.browser.user_agent);
        assert_eq!(
            config.crawl.result_link_selector,
            defaults.crawl.result_link_selector
        );
        assert_eq!(config.crawl.denied_domains, defaults.crawl.denied_domains);
        assert_eq!(
            config.extraction.content_selectors,
            defaults.extraction.content_selectors
        );
        assert_eq!(
            config.weather.search_input_selector,
            defaults.weather.search_input_selector
        );
        assert_eq!(
            config.weather.not_found_phrases,
            defaults.weather.not_found_phrases
        );
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[crawl]
max_results_cap = 8

[weather]
enabled = false
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom values
        assert_eq!(config.crawl.max_results_cap, 8);
        assert!(!config.weather.enabled);
        // Defaults
        assert_eq!(config.crawl.default_num_results, 3);
        assert_eq!(config.weather.timeout_secs, 15);
        assert_eq!(config.server.service_name, "glean");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.extraction.min_words, 20);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glean.toml");
        fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_create_default_config_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.crawl.max_results_cap, 5);
    }
}
