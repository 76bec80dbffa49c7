//! Helpers over a parsed page snapshot.

use scraper::{ElementRef, Html, Selector};

use crate::config::ConfigError;

/// Elements whose content is never rendered as text.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "canvas", "iframe", "head",
];

/// Elements that start and end on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "section", "table", "tr", "ul",
];

/// Parse a configured CSS selector.
pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a list of configured CSS selectors.
pub fn parse_selectors(selectors: &[String]) -> Result<Vec<Selector>, ConfigError> {
    selectors.iter().map(|s| parse_selector(s)).collect()
}

/// Text of `element` as a browser would render it: hidden elements dropped,
/// source whitespace collapsed outside `<pre>`, block elements on their own
/// lines. The result still needs [`normalize`](crate::normalizer::normalize).
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_rendered(element, false, &mut out);
    out
}

fn push_rendered(element: ElementRef<'_>, preformatted: bool, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            if preformatted {
                out.push_str(text);
            } else {
                push_collapsed(text, out);
            }
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };

        let name = child.value().name();
        if SKIPPED_TAGS.contains(&name) {
            continue;
        }
        match name {
            "br" => out.push('\n'),
            "td" | "th" => {
                push_rendered(child, preformatted, out);
                out.push(' ');
            }
            "p" => {
                break_line(out, 2);
                push_rendered(child, preformatted, out);
                break_line(out, 2);
            }
            "pre" | "textarea" => {
                break_line(out, 1);
                push_rendered(child, true, out);
                break_line(out, 1);
            }
            _ if BLOCK_TAGS.contains(&name) => {
                break_line(out, 1);
                push_rendered(child, preformatted, out);
                break_line(out, 1);
            }
            _ => push_rendered(child, preformatted, out),
        }
    }
}

/// Make `out` end with at least `count` line breaks.
fn break_line(out: &mut String, count: usize) {
    let len = out.trim_end_matches(' ').len();
    out.truncate(len);
    if out.is_empty() {
        return;
    }
    let existing = out.len() - out.trim_end_matches('\n').len();
    for _ in existing..count {
        out.push('\n');
    }
}

fn push_collapsed(text: &str, out: &mut String) {
    for c in text.chars() {
        if !c.is_whitespace() {
            out.push(c);
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The `<body>` element, if the snapshot has one.
pub fn body(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("body").ok()?;
    document.select(&selector).next()
}

/// The `<title>` text, whitespace-collapsed.
pub fn title(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|title| {
            title
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
