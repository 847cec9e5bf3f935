//! Entity normalization and the built-in naive extractor.
//!
//! The real named-entity extractor is an external collaborator; this module
//! provides the shared normalization rules and a capitalized-run fallback
//! used when no extractor is wired in (and by tests).

use std::collections::HashSet;
use std::sync::LazyLock;

use argus_core::traits::IEntityExtractor;
use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Capitalized runs of 1-4 words, the crude stand-in for real NER.
static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z0-9\-]{2,}(?:\s+[A-Z][A-Za-z0-9\-]{1,}){0,3})\b").unwrap()
});

/// Filler words and common NER false positives, excluded outright.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "this", "that", "these", "those", "and", "but", "for", "with", "from", "into",
        "during", "before", "after", "above", "below", "between", "through", "said", "says",
        "according", "reported", "sources", "officials", "new", "old", "first", "last", "next",
        "previous", "recent", "latest", "current", "former", "major", "minor", "large", "small",
        "big", "little", "today", "yesterday", "tomorrow", "week", "month", "year", "time",
        "times", "day", "days", "hours", "minutes", "seconds", "news", "report", "reports",
        "article", "articles", "story", "stories", "post", "posts", "update", "updates",
        "information", "data", "details", "users", "user", "customers", "customer", "clients",
        "client", "people", "person", "individuals", "individual",
    ]
    .into_iter()
    .collect()
});

/// Whether a candidate is a known filler word.
pub fn is_stopword(name: &str) -> bool {
    STOPWORDS.contains(name.to_lowercase().as_str())
}

/// Normalize an entity name: trim and strip quotes, collapse whitespace,
/// lower-case — unless the token is a short all-caps acronym (FBI, NSA),
/// which is kept as-is.
pub fn normalize_entity(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    let collapsed = WHITESPACE.replace_all(trimmed, " ").into_owned();
    let is_acronym = collapsed.chars().count() <= 4
        && !collapsed.is_empty()
        && collapsed.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
    if is_acronym {
        collapsed
    } else {
        collapsed.to_lowercase()
    }
}

/// Unordered co-mention pairs over a chunk's entities, keyed by the sorted
/// pair, capped to bound edge fan-out on entity-dense chunks.
pub fn co_mention_pairs(entities: &[String], max_pairs: usize) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            if entities[i] == entities[j] {
                continue;
            }
            let (a, b) = if entities[i] <= entities[j] {
                (entities[i].clone(), entities[j].clone())
            } else {
                (entities[j].clone(), entities[i].clone())
            };
            pairs.push((a, b));
            if pairs.len() >= max_pairs {
                return pairs;
            }
        }
    }
    pairs
}

/// Naive entity extractor: capitalized token runs, normalized, stop-words
/// dropped, order-preserving dedup.
#[derive(Debug, Default)]
pub struct NaiveEntityExtractor;

impl IEntityExtractor for NaiveEntityExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cap in CAPITALIZED_RUN.captures_iter(text) {
            let normalized = normalize_entity(&cap[1]);
            if normalized.chars().count() < 2 || is_stopword(&normalized) {
                continue;
            }
            // Sentence fragments that begin with a connector are junk.
            let lower = normalized.to_lowercase();
            if ["the ", "this ", "that ", "these ", "those ", "and ", "but "]
                .iter()
                .any(|starter| lower.starts_with(starter))
            {
                continue;
            }
            if seen.insert(normalized.clone()) {
                out.push(normalized);
            }
        }
        out
    }
}
