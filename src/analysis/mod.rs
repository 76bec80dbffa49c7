//! Reading aids computed over extracted page text.
//!
//! [`analyze`] turns the `content` of an extraction into counts, frequent
//! words, keyword sentences, simple entities and a heading outline.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const TOP_WORDS: usize = 10;
const KEY_SENTENCES: usize = 5;
const DATES: usize = 5;
const PROPER_NOUNS: usize = 10;
const HEADINGS: usize = 5;
const EXCERPT_CHARS: usize = 200;

/// Words too common to count as topics.
const STOPWORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "et", "à", "de", "du", "en", "est", "pour", "dans",
    "sur", "au", "qui", "que", "par", "il", "elle", "ils", "elles", "ce", "cette", "ces", "son",
    "sa", "ses", "avec",
];

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("PARAGRAPH_BREAK regex"));

static WORD_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").expect("WORD_PUNCTUATION regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("SENTENCE_END regex"));

/// `12/05/2024` or `3 mars 2024`.
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:\d{1,2}/\d{1,2}/\d{2,4}|\d{1,2} (?:janvier|février|mars|avril|mai|juin|juillet|août|septembre|octobre|novembre|décembre) \d{2,4})\b",
    )
    .expect("DATE regex")
});

/// A capitalised word of three letters or more after whitespace.
static PROPER_NOUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s([A-Z][a-zàáâäæçèéêëìíîïñòóôöùúûüÿ]{2,})").expect("PROPER_NOUN regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    pub paragraphs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// A short line that looks like a heading, with the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub title: String,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    pub stats: TextStats,
    pub top_words: Vec<WordCount>,
    pub key_sentences: Vec<String>,
    pub dates: Vec<String>,
    pub proper_nouns: Vec<String>,
    pub outline: Vec<Heading>,
}

/// Analyze extracted text.
pub fn analyze(content: &str) -> ContentReport {
    let top_words = top_words(content);
    ContentReport {
        stats: stats(content),
        key_sentences: key_sentences(content, &top_words),
        dates: unique_first(DATE.find_iter(content).map(|m| m.as_str()), DATES),
        proper_nouns: unique_first(
            PROPER_NOUN
                .captures_iter(content)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str()),
            PROPER_NOUNS,
        ),
        outline: outline(content),
        top_words,
    }
}

pub fn stats(content: &str) -> TextStats {
    TextStats {
        characters: content.chars().count(),
        words: content.split_whitespace().count(),
        lines: content.split('\n').count(),
        paragraphs: PARAGRAPH_BREAK.split(content).count(),
    }
}

/// Most frequent words longer than two characters, stopwords excluded.
///
/// Equal counts keep first-appearance order.
pub fn top_words(content: &str) -> Vec<WordCount> {
    let lowered = content.to_lowercase();
    let cleaned = WORD_PUNCTUATION.replace_all(&lowered, "");

    let mut counts: Vec<WordCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() <= 2 || STOPWORDS.contains(&word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word, counts.len());
                counts.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_WORDS);
    counts
}

fn key_sentences(content: &str, top_words: &[WordCount]) -> Vec<String> {
    SENTENCE_END
        .split(content)
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > 20)
        .filter(|sentence| {
            let lowered = sentence.to_lowercase();
            top_words.iter().any(|w| lowered.contains(&w.word))
        })
        .take(KEY_SENTENCES)
        .map(str::to_string)
        .collect()
}

fn outline(content: &str) -> Vec<Heading> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            line.chars().count() < 60
                && (**line == line.to_uppercase() || line.split_whitespace().count() < 8)
        })
        .take(HEADINGS)
        .map(|(i, line)| Heading {
            title: line.to_string(),
            excerpt: lines
                .get(i + 1..(i + 3).min(lines.len()))
                .filter(|following| !following.is_empty())
                .map(|following| excerpt(&following.join("\n"))),
        })
        .collect()
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None if text.chars().count() == EXCERPT_CHARS => format!("{text}..."),
        None => text.to_string(),
    }
}

fn unique_first<'a>(items: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if seen.len() == limit {
            break;
        }
        if !seen.iter().any(|s| s == item) {
            seen.push(item.to_string());
        }
    }
    seen
}

impl fmt::Display for ContentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STATISTICS")?;
        writeln!(f, "- Characters: {}", self.stats.characters)?;
        writeln!(f, "- Words: {}", self.stats.words)?;
        writeln!(f, "- Lines: {}", self.stats.lines)?;
        writeln!(f, "- Paragraphs: {}", self.stats.paragraphs)?;

        writeln!(f, "\nTOP {} WORDS", TOP_WORDS)?;
        for (rank, word) in self.top_words.iter().enumerate() {
            writeln!(f, "{}. {:?} - {} occurrences", rank + 1, word.word, word.count)?;
        }

        writeln!(f, "\nKEY SENTENCES")?;
        for sentence in &self.key_sentences {
            writeln!(f, "- {}", sentence)?;
        }

        writeln!(f, "\nENTITIES")?;
        if !self.dates.is_empty() {
            writeln!(f, "Dates:")?;
            for date in &self.dates {
                writeln!(f, "- {}", date)?;
            }
        }
        if !self.proper_nouns.is_empty() {
            writeln!(f, "Proper nouns:")?;
            for name in &self.proper_nouns {
                writeln!(f, "- {}", name)?;
            }
        }

        writeln!(f, "\nOUTLINE")?;
        for heading in &self.outline {
            writeln!(f, "\n### {} ###", heading.title)?;
            if let Some(ref excerpt) = heading.excerpt {
                writeln!(f, "{}", excerpt)?;
            }
        }
        Ok(())
    }
}
