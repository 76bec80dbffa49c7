use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GleanError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No results found: {0}")]
    NoResultsFound(String),

    #[error("Target unreachable: {url} ({reason})")]
    TargetUnreachable { url: String, reason: String },

    #[error("Extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Browser error: {0}")]
    Browser(String),

    /// Weather-path failure. Recovered by the generic path, never returned to callers.
    #[error("Weather provider failed: {0}")]
    Weather(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GleanError {
    /// Whether the failure means "nothing usable was found" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GleanError::NoResultsFound(_) | GleanError::TargetUnreachable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(GleanError::NoResultsFound("q".into()).is_not_found());
        assert!(GleanError::TargetUnreachable {
            url: "https://example.com".into(),
            reason: "timeout".into(),
        }
        .is_not_found());
        assert!(!GleanError::ExtractionFailure("boom".into()).is_not_found());
        assert!(!GleanError::Browser("crashed".into()).is_not_found());
    }

    #[test]
    fn test_target_unreachable_mentions_url() {
        let err = GleanError::TargetUnreachable {
            url: "https://slow.example.com/page".into(),
            reason: "navigation timed out".into(),
        };
        assert!(err.to_string().contains("https://slow.example.com/page"));
    }
}
