use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::app::{GleanError, Result};
use crate::config::WeatherConfig;
use crate::domain::ExtractionResult;
use crate::extractor::WeatherExtractor;
use crate::scraper::PageSession;

/// Provider URL slug: lower case, diacritics stripped, words joined by `-`.
///
/// `"Saint-Étienne"` becomes `"saint-etienne"`.
pub fn city_slug(city: &str) -> String {
    let mut slug = String::with_capacity(city.len());
    for c in city.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Load the provider's page for `city` and read it.
///
/// Tries the direct forecast URL first, then the provider's own search box.
pub(crate) async fn provider_page(
    page: &dyn PageSession,
    config: &WeatherConfig,
    extractor: &WeatherExtractor,
    city: &str,
    settle: std::time::Duration,
) -> Result<ExtractionResult> {
    let slug = city_slug(city);
    if slug.is_empty() {
        return Err(GleanError::Weather(format!("no usable slug for {:?}", city)));
    }

    let forecast_url = config.forecast_url(&slug);
    tracing::info!("Weather provider: {}", forecast_url);
    page.navigate(&forecast_url, config.timeout()).await?;

    if landed_on_not_found(page, extractor).await? {
        tracing::info!("No direct page for {:?}, using provider search", slug);
        search_provider(page, config, city, settle).await?;

        if landed_on_not_found(page, extractor).await? {
            return Err(GleanError::Weather(format!(
                "provider has no page for {:?}",
                city
            )));
        }
    }

    let html = page.html().await?;
    let url = page.current_url().await?;
    Ok(extractor.extract(&html, &url))
}

async fn landed_on_not_found(page: &dyn PageSession, extractor: &WeatherExtractor) -> Result<bool> {
    let url = page.current_url().await?;
    let html = page.html().await?;
    Ok(extractor.page_not_found(&html, &url))
}

async fn search_provider(
    page: &dyn PageSession,
    config: &WeatherConfig,
    city: &str,
    settle: std::time::Duration,
) -> Result<()> {
    page.navigate(&config.base_url, config.timeout()).await?;

    if page.click(&config.cookie_button_selector).await? {
        tracing::debug!("Dismissed cookie consent");
    }

    page.type_text(&config.search_input_selector, city).await?;
    page.wait_for_selector(&config.suggestion_selector, config.timeout())
        .await?;
    if !page.click(&config.suggestion_selector).await? {
        return Err(GleanError::Weather(format!(
            "no autocomplete suggestion for {:?}",
            city
        )));
    }
    page.wait_for_navigation(config.timeout()).await?;
    tokio::time::sleep(settle).await;
    Ok(())
}
