use std::fmt;

use crate::app::{GleanError, Result};

/// A validated, trimmed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Validate a raw query. Blank input is rejected before any crawl starts.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GleanError::InvalidQuery(
                "query must be a non-empty string".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_queries() {
        for raw in ["", "   ", "\n\t"] {
            assert!(matches!(Query::new(raw), Err(GleanError::InvalidQuery(_))));
        }
    }

    #[test]
    fn test_trims_query() {
        let query = Query::new("  météo à Lyon ").unwrap();
        assert_eq!(query.as_str(), "météo à Lyon");
        assert_eq!(query.to_string(), "météo à Lyon");
    }
}
