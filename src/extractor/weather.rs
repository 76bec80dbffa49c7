use scraper::{Html, Selector};

use crate::config::{ConfigError, WeatherConfig};
use crate::domain::{ExtractionResult, WeatherFields};
use crate::extractor::dom;
use crate::normalizer::normalize;

/// Reads one weather provider's page layout.
///
/// Unlike [`MainContentExtractor`](crate::extractor::MainContentExtractor)
/// there is no scoring: the provider's containers are taken in order.
#[derive(Debug, Clone)]
pub struct WeatherExtractor {
    temperature: Selector,
    summary: Selector,
    forecast: Selector,
    precipitation: Selector,
    bulletin: Selector,
    containers: Vec<Selector>,
    not_found_marker: String,
    not_found_phrases: Vec<String>,
}

impl WeatherExtractor {
    pub fn new(config: &WeatherConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            temperature: dom::parse_selector(&config.temperature_selector)?,
            summary: dom::parse_selector(&config.summary_selector)?,
            forecast: dom::parse_selector(&config.forecast_selector)?,
            precipitation: dom::parse_selector(&config.precipitation_selector)?,
            bulletin: dom::parse_selector(&config.bulletin_selector)?,
            containers: dom::parse_selectors(&config.container_selectors)?,
            not_found_marker: config.not_found_marker.clone(),
            not_found_phrases: config
                .not_found_phrases
                .iter()
                .map(|phrase| phrase.to_lowercase())
                .collect(),
        })
    }

    pub fn extract(&self, html: &str, url: &str) -> ExtractionResult {
        let document = Html::parse_document(html);
        let title = dom::title(&document);
        let body = dom::body(&document);

        let meteo_data = WeatherFields {
            temperature: field(&document, &self.temperature),
            summary: field(&document, &self.summary),
            forecast: field(&document, &self.forecast),
            precipitation: field(&document, &self.precipitation),
            bulletin: field(&document, &self.bulletin),
        };

        let full_page_content = body
            .map(|body| normalize(&dom::rendered_text(body)))
            .unwrap_or_default();
        let content = self
            .containers
            .iter()
            .find_map(|selector| document.select(selector).next())
            .map(|region| normalize(&dom::rendered_text(region)))
            .unwrap_or_else(|| full_page_content.clone());

        ExtractionResult {
            title,
            url: url.to_string(),
            content,
            full_page_content,
            meteo_data: Some(meteo_data),
        }
    }

    /// Whether the provider answered with its "no such page" page.
    pub fn page_not_found(&self, html: &str, url: &str) -> bool {
        if !self.not_found_marker.is_empty() && url.contains(&self.not_found_marker) {
            return true;
        }
        if self.not_found_phrases.is_empty() {
            return false;
        }
        let document = Html::parse_document(html);
        let Some(body) = dom::body(&document) else {
            return false;
        };
        let text = dom::rendered_text(body).to_lowercase();
        self.not_found_phrases
            .iter()
            .any(|phrase| text.contains(phrase.as_str()))
    }
}

fn field(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| normalize(&dom::rendered_text(element)))
        .filter(|text| !text.is_empty())
}
