//! Query intent classification.
//!
//! Decides whether a query asks about the weather and, when it does, which
//! place it is about. Only French (plus a couple of English) weather words are
//! recognised.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const WEATHER_WORDS: &str = r"(?:m[ée]t[ée]o|temp[ée]ratures?|climat|pr[ée]visions?|weather)";
const PREPOSITIONS: &str = r"(?:à|a|au|aux|en|de|du|pour|sur|in|at)";
const PLACE_WORD: &str = r"[\p{L}][\p{L}\p{M}'’\-]*";

static WEATHER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b{WEATHER_WORDS}\b")).expect("weather vocabulary"));

/// Place patterns, tried in order. Each has a `place` capture group.
static PLACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "météo à Lyon", "quel temps ... température à Paris demain"
        format!(r"(?i)\b{WEATHER_WORDS}\b.*?\s{PREPOSITIONS}\s+(?P<place>{PLACE_WORD}(?:\s+{PLACE_WORD})*)"),
        // "Lyon météo"
        format!(r"(?i)^\s*(?P<place>{PLACE_WORD}(?:\s+{PLACE_WORD})*?)\s+{WEATHER_WORDS}\b"),
        // "météo Lyon"
        format!(r"(?i)\b{WEATHER_WORDS}\s+(?P<place>{PLACE_WORD}(?:\s+{PLACE_WORD})*)"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("place pattern"))
    .collect()
});

/// Time expressions that trail a place name ("Lyon demain").
static TRAILING_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\s+(?:demain|aujourd'hui|aujourd’hui|ce\s+soir|ce\s+matin|ce\s+week-end|cette\s+semaine|maintenant|today|tomorrow))+\s*$",
    )
    .expect("time words")
});

/// Tokens of [`PREPOSITIONS`], for scanning a captured place word by word.
const PREPOSITION_WORDS: &[&str] = &["à", "a", "au", "aux", "en", "de", "du", "pour", "sur", "in", "at"];

/// Articles and time words that can open a capture ahead of the real place
/// ("du jour à Paris", "de la semaine à Nantes").
const LEADING_FILLER: &[&str] = &[
    "le", "la", "les", "l'", "ce", "cet", "cette", "ces", "jour", "journée", "jours", "demain",
    "aujourd'hui", "aujourd’hui", "soir", "matin", "semaine", "week-end", "weekend", "prochain",
    "prochaine", "prochains", "prochaines", "maintenant", "the", "this", "week", "today",
    "tomorrow",
];

/// Words that can sit where a place would but never are one.
const NOT_PLACES: &[&str] = &[
    "quel", "quelle", "quels", "quelles", "la", "le", "les", "une", "un", "ma", "mon", "the",
    "what", "demain", "aujourd'hui", "prévisions", "previsions", "météo", "meteo", "bulletin",
];

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryIntent {
    pub is_weather: bool,
    pub city: Option<String>,
}

impl QueryIntent {
    /// Whether the weather provider chain applies.
    pub fn wants_weather_provider(&self) -> bool {
        self.is_weather && self.city.is_some()
    }
}

/// Classify a query. Pure and deterministic.
pub fn classify(query: &str) -> QueryIntent {
    if !WEATHER_RE.is_match(query) {
        return QueryIntent {
            is_weather: false,
            city: None,
        };
    }

    let city = PLACE_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(query)?.name("place")?.as_str();
        clean_place(captured)
    });

    QueryIntent {
        is_weather: true,
        city,
    }
}

/// Drop a leading run of articles and time words that ends in a preposition.
///
/// Returns `None` when nothing but such words is left.
fn skip_leading_filler(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    let mut start = 0;
    for (i, word) in words.iter().enumerate() {
        let lowered = word.to_lowercase();
        if PREPOSITION_WORDS.contains(&lowered.as_str()) {
            start = i + 1;
        } else if !LEADING_FILLER.contains(&lowered.as_str()) {
            break;
        }
    }

    let rest = &words[start..];
    if rest
        .iter()
        .all(|word| LEADING_FILLER.contains(&word.to_lowercase().as_str()))
    {
        return None;
    }
    Some(rest.join(" "))
}

fn clean_place(raw: &str) -> Option<String> {
    let place = skip_leading_filler(raw)?;
    let place = TRAILING_TIME_RE.replace(&place, "");
    let place = place
        .trim()
        .trim_end_matches(['?', '!', '.', ',', ';', ':'])
        .trim();

    if place.is_empty() || WEATHER_RE.is_match(place) {
        return None;
    }
    let lowered = place.to_lowercase();
    if NOT_PLACES.contains(&lowered.as_str()) {
        return None;
    }
    Some(place.to_string())
}
