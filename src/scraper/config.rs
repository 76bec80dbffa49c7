use serde::{Deserialize, Serialize};

/// Configuration for the headless browser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Maximum concurrently open tabs, one per request (default: 5)
    pub max_concurrency: usize,

    /// Whether to block images for faster loading (default: true)
    pub block_images: bool,

    /// Whether to block stylesheets for faster loading (default: true)
    pub block_stylesheets: bool,

    /// Whether to block web fonts (default: true)
    pub block_fonts: bool,

    /// Whether to block audio and video (default: true)
    pub block_media: bool,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            max_concurrency: 5,
            block_images: true,
            block_stylesheets: true,
            block_fonts: true,
            block_media: true,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl ScraperConfig {
    /// URL patterns handed to the browser's request blocker.
    pub fn blocked_url_patterns(&self) -> Vec<String> {
        let groups: [(bool, &[&str]); 4] = [
            (
                self.block_images,
                &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg", "ico"],
            ),
            (self.block_stylesheets, &["css"]),
            (self.block_fonts, &["woff", "woff2", "ttf", "otf", "eot"]),
            (self.block_media, &["mp4", "webm", "mp3", "ogg", "m3u8"]),
        ];

        groups
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, extensions)| extensions.iter().map(|ext| format!("*://*:*/*.{ext}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert_eq!(config.max_concurrency, 5);
        assert!(config.block_images);
        assert!(config.block_stylesheets);
        assert!(config.block_fonts);
        assert!(config.user_agent.is_some());
    }

    #[test]
    fn test_blocked_patterns_follow_flags() {
        let config = ScraperConfig {
            block_images: false,
            block_media: false,
            ..Default::default()
        };
        let patterns = config.blocked_url_patterns();
        assert!(patterns.contains(&"*://*:*/*.css".to_string()));
        assert!(patterns.contains(&"*://*:*/*.woff2".to_string()));
        assert!(!patterns.contains(&"*://*:*/*.png".to_string()));
        assert!(!patterns.contains(&"*://*:*/*.mp4".to_string()));
    }

    #[test]
    fn test_nothing_blocked() {
        let config = ScraperConfig {
            block_images: false,
            block_stylesheets: false,
            block_fonts: false,
            block_media: false,
            ..Default::default()
        };
        assert!(config.blocked_url_patterns().is_empty());
    }
}
