//! Link-density scoring of candidate content regions.

use scraper::{ElementRef, Selector};

use crate::config::ConfigError;
use crate::extractor::dom;

/// Scores regions by `words * (1 - link_density)`.
///
/// Link density is the number of `<a>` descendants per word, so menus and
/// footers lose to prose without needing a list of bad class names.
#[derive(Debug, Clone)]
pub struct ContentScorer {
    min_words: usize,
    anchor: Selector,
}

impl ContentScorer {
    pub fn new(min_words: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            min_words,
            anchor: dom::parse_selector("a")?,
        })
    }

    /// Score one region. Anything under `min_words` words scores zero.
    pub fn score(&self, region: ElementRef<'_>) -> f64 {
        let words = dom::word_count(&dom::rendered_text(region));
        if words < self.min_words {
            return 0.0;
        }
        let anchors = region.select(&self.anchor).count();
        let link_density = anchors as f64 / words.max(1) as f64;
        (words as f64 * (1.0 - link_density)).max(0.0)
    }

    /// Pick the best region, starting from `fallback` as the incumbent.
    ///
    /// A candidate replaces the incumbent only when it scores strictly higher.
    pub fn select_best<'a, I>(&self, candidates: I, fallback: ElementRef<'a>) -> ElementRef<'a>
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        let mut best = fallback;
        let mut best_score = self.score(fallback);

        for candidate in candidates {
            let score = self.score(candidate);
            if score > best_score {
                tracing::debug!(
                    "Region <{}> beats incumbent ({:.1} > {:.1})",
                    candidate.value().name(),
                    score,
                    best_score
                );
                best = candidate;
                best_score = score;
            }
        }

        best
    }
}
