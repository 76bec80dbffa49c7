use serde::{Deserialize, Serialize};

/// Cleaned text extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    pub url: String,
    /// Normalized text of the selected main region
    pub content: String,
    /// Normalized text of the whole body, whatever region was selected
    pub full_page_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meteo_data: Option<WeatherFields>,
}

/// Fields read from a weather provider page. Absent selectors give `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherFields {
    pub temperature: Option<String>,
    pub summary: Option<String>,
    pub forecast: Option<String>,
    pub precipitation: Option<String>,
    pub bulletin: Option<String>,
}

/// A result link that could not be crawled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkError {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    /// Links asked for, after clamping to the configured ceiling
    pub requested: usize,
    /// Unique qualifying links collected from the results page
    pub found: usize,
    pub successful: usize,
}

/// Outcome of a multi-result crawl: successes and per-link failures side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiCrawlOutcome {
    pub results: Vec<ExtractionResult>,
    pub errors: Vec<LinkError>,
    pub stats: CrawlStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_result_serializes_camel_case() {
        let result = ExtractionResult {
            title: "Titre".into(),
            url: "https://example.com".into(),
            content: "contenu".into(),
            full_page_content: "page".into(),
            meteo_data: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fullPageContent"], "page");
        assert!(json.get("meteoData").is_none());
    }

    #[test]
    fn test_weather_fields_serialize_nulls() {
        let result = ExtractionResult {
            title: String::new(),
            url: String::new(),
            content: String::new(),
            full_page_content: String::new(),
            meteo_data: Some(WeatherFields {
                temperature: Some("12°".into()),
                ..Default::default()
            }),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["meteoData"]["temperature"], "12°");
        assert!(json["meteoData"]["bulletin"].is_null());
    }
}
