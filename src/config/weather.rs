use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weather provider layout and navigation settings.
///
/// The defaults describe one French provider. Every selector may list several
/// alternatives separated by commas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Try the provider before generic search for weather queries (default: true)
    pub enabled: bool,

    /// Provider home page, also the site-search entry point
    pub base_url: String,

    /// Path of a city forecast page; `{slug}` is replaced by the city slug
    pub forecast_path: String,

    /// Substring of the final URL that means "no such city page"
    pub not_found_marker: String,

    /// Page text phrases (case-insensitive) that mean "no such city page"
    pub not_found_phrases: Vec<String>,

    pub cookie_button_selector: String,
    pub search_input_selector: String,
    pub suggestion_selector: String,

    /// Per-step timeout on the provider site in seconds (default: 15)
    pub timeout_secs: u64,

    pub temperature_selector: String,
    pub summary_selector: String,
    pub forecast_selector: String,
    pub precipitation_selector: String,
    pub bulletin_selector: String,

    /// Main content containers in priority order; the body is used when none match
    pub container_selectors: Vec<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://meteofrance.com".to_string(),
            forecast_path: "/previsions-meteo-france/{slug}".to_string(),
            not_found_marker: "/404".to_string(),
            not_found_phrases: vec![
                "page introuvable".to_string(),
                "cette page n'existe pas".to_string(),
                "aucun résultat".to_string(),
            ],
            cookie_button_selector: "#didomi-notice-agree-button".to_string(),
            search_input_selector: "input[type=\"search\"], #search-input".to_string(),
            suggestion_selector: ".autocomplete-result a, .search-results li a".to_string(),
            timeout_secs: 15,
            temperature_selector: ".weather_temp, .today .temperature".to_string(),
            summary_selector: ".weather_summary, .today .summary".to_string(),
            forecast_selector: ".daily-forecast, .forecast-days".to_string(),
            precipitation_selector: ".rain-forecast, .precipitation".to_string(),
            bulletin_selector: ".bulletin, .weather-bulletin".to_string(),
            container_selectors: vec![
                "#main-content".to_string(),
                ".weather-container".to_string(),
                "main".to_string(),
            ],
        }
    }
}

impl WeatherConfig {
    /// Forecast page URL for a city slug.
    pub fn forecast_url(&self, slug: &str) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.forecast_path.replace("{slug}", slug)
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
