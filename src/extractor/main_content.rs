use scraper::{ElementRef, Html, Selector};

use crate::config::ConfigError;
use crate::domain::ExtractionResult;
use crate::extractor::config::ExtractionConfig;
use crate::extractor::dom;
use crate::extractor::scorer::ContentScorer;
use crate::normalizer::normalize;

/// Picks the main readable region of a page snapshot.
///
/// Candidate containers are scored against the body; when none beats it, the
/// parent holding the most substantial paragraphs is used instead.
#[derive(Debug, Clone)]
pub struct MainContentExtractor {
    candidates: Vec<Selector>,
    paragraph: Selector,
    scorer: ContentScorer,
    min_paragraph_chars: usize,
    min_paragraphs: usize,
}

impl MainContentExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            candidates: dom::parse_selectors(&config.content_selectors)?,
            paragraph: dom::parse_selector("p")?,
            scorer: ContentScorer::new(config.min_words)?,
            min_paragraph_chars: config.min_paragraph_chars,
            min_paragraphs: config.min_paragraphs,
        })
    }

    /// Extract title, focused content and full body text from `html`.
    pub fn extract(&self, html: &str, url: &str) -> ExtractionResult {
        let document = Html::parse_document(html);
        let title = dom::title(&document);

        let Some(body) = dom::body(&document) else {
            return ExtractionResult {
                title,
                url: url.to_string(),
                content: String::new(),
                full_page_content: String::new(),
                meteo_data: None,
            };
        };

        let region = self.select_region(&document, body);
        let full_page_content = normalize(&dom::rendered_text(body));
        let content = if region.id() == body.id() {
            full_page_content.clone()
        } else {
            normalize(&dom::rendered_text(region))
        };

        ExtractionResult {
            title,
            url: url.to_string(),
            content,
            full_page_content,
            meteo_data: None,
        }
    }

    fn select_region<'a>(&self, document: &'a Html, body: ElementRef<'a>) -> ElementRef<'a> {
        let candidates = self
            .candidates
            .iter()
            .flat_map(|selector| document.select(selector));
        let best = self.scorer.select_best(candidates, body);
        if best.id() != body.id() {
            return best;
        }

        match self.densest_paragraph_parent(document) {
            Some(parent) => {
                tracing::debug!("Using paragraph-dense <{}> region", parent.value().name());
                parent
            }
            None => body,
        }
    }

    /// Parent element with the most paragraphs longer than
    /// `min_paragraph_chars`, if it has more than `min_paragraphs` of them.
    fn densest_paragraph_parent<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let mut parents: Vec<(ElementRef<'a>, usize)> = Vec::new();

        for paragraph in document.select(&self.paragraph) {
            let text: String = paragraph.text().collect();
            if text.trim().chars().count() <= self.min_paragraph_chars {
                continue;
            }
            let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            match parents.iter_mut().find(|(seen, _)| seen.id() == parent.id()) {
                Some((_, count)) => *count += 1,
                None => parents.push((parent, 1)),
            }
        }

        let mut best: Option<(ElementRef<'a>, usize)> = None;
        for (parent, count) in parents {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((parent, count));
            }
        }

        best.filter(|(_, count)| *count > self.min_paragraphs)
            .map(|(parent, _)| parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> MainContentExtractor {
        MainContentExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    fn sentence(seed: &str) -> String {
        format!("{seed} est une phrase suffisamment longue pour compter comme un vrai paragraphe.")
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("mot{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_extracts_article_from_icon_heavy_page() {
        let icons = (0..40)
            .map(|i| format!("<a href='/{i}'><img src='/{i}.png'></a>"))
            .collect::<String>();
        let html = format!(
            "<html><head><title>Actu</title></head><body><header>{icons}</header>\
             <article><h1>Titre</h1><p>{}</p></article></body></html>",
            words(50)
        );
        let result = extractor().extract(&html, "https://news.example.com/a");

        assert_eq!(result.title, "Actu");
        assert_eq!(result.url, "https://news.example.com/a");
        assert!(result.content.starts_with("Titre"));
        assert!(result.content.contains("mot49"));
        assert!(result.meteo_data.is_none());
    }

    #[test]
    fn test_paragraph_density_fallback() {
        let paragraphs = (0..5)
            .map(|i| format!("<p>{}</p>", sentence(&format!("Numéro {i}"))))
            .collect::<String>();
        let html = format!(
            "<body><div class='menu'>Accueil Sport Culture</div>\
             <div id='story'>{paragraphs}</div><div class='footer'>Mentions légales</div></body>"
        );
        let result = extractor().extract(&html, "https://example.com");

        assert!(result.content.starts_with("Numéro 0"));
        assert!(!result.content.contains("Accueil"));
        assert!(!result.content.contains("Mentions"));
        assert!(result.full_page_content.contains("Accueil"));
    }

    #[test]
    fn test_paragraph_fallback_needs_more_than_three() {
        let paragraphs = (0..3)
            .map(|i| format!("<p>{}</p>", sentence(&format!("Numéro {i}"))))
            .collect::<String>();
        let html = format!("<body><div>Menu</div><div id='story'>{paragraphs}</div></body>");
        let result = extractor().extract(&html, "https://example.com");

        assert_eq!(result.content, result.full_page_content);
        assert!(result.content.starts_with("Menu"));
    }

    #[test]
    fn test_short_paragraphs_are_not_counted() {
        let paragraphs = (0..8).map(|i| format!("<p>court {i}</p>")).collect::<String>();
        let html = format!("<body><nav>Menu</nav><div>{paragraphs}</div></body>");
        let result = extractor().extract(&html, "https://example.com");
        assert_eq!(result.content, result.full_page_content);
    }

    #[test]
    fn test_full_page_content_without_candidates() {
        let result = extractor().extract(
            "<html><body><span>Juste un peu de texte</span></body></html>",
            "https://example.com",
        );
        assert_eq!(result.full_page_content, "Juste un peu de texte");
        assert_eq!(result.content, "Juste un peu de texte");
        assert_eq!(result.title, "");
    }

    #[test]
    fn test_empty_page_gives_empty_strings() {
        let result = extractor().extract("", "about:blank");
        assert_eq!(result.content, "");
        assert_eq!(result.full_page_content, "");
    }

    #[test]
    fn test_output_is_normalized_text() {
        let html = "<body><p>  Un   <b>texte</b>\n\n\n\n avec   espaces </p><script>alert(1)</script></body>";
        let result = extractor().extract(html, "https://example.com");
        assert_eq!(result.full_page_content, "Un texte avec espaces");
        assert!(!result.full_page_content.contains('<'));
    }
}
