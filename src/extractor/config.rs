use serde::{Deserialize, Serialize};

/// Thresholds and selectors for the main-content heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Likely content containers. Every match is scored; order does not matter.
    pub content_selectors: Vec<String>,

    /// Regions with fewer words score zero (default: 20)
    pub min_words: usize,

    /// A paragraph counts as substantial above this many characters (default: 50)
    pub min_paragraph_chars: usize,

    /// A parent must hold more than this many substantial paragraphs (default: 3)
    pub min_paragraphs: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_selectors: vec![
                "article".to_string(),
                "main".to_string(),
                "[role=\"main\"]".to_string(),
                ".content".to_string(),
                "#content".to_string(),
                ".post-content".to_string(),
                ".article-content".to_string(),
                ".entry-content".to_string(),
                ".post".to_string(),
                ".article".to_string(),
                ".main-content".to_string(),
                "#main-content".to_string(),
            ],
            min_words: 20,
            min_paragraph_chars: 50,
            min_paragraphs: 3,
        }
    }
}
