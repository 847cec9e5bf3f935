//! Entity quality and scoring policy, kept apart from the graph mechanics
//! so it can be swapped or tested without touching graph state.

use crate::extract::is_stopword;

/// Quality gate for ranking. Excluded outright: stop-words, pure numbers,
/// names under 2 characters, and names with no upper-case character.
pub fn is_quality_entity(name: &str) -> bool {
    if name.chars().count() < 2 {
        return false;
    }
    if is_stopword(name) {
        return false;
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    name.chars().any(|c| c.is_uppercase())
}

/// Multiplier rewarding shapes that look like real-world entities.
pub fn quality_multiplier(name: &str) -> f64 {
    let mut multiplier = 1.0;
    let has_upper = name.chars().any(|c| c.is_uppercase());
    let has_lower = name.chars().any(|c| c.is_lowercase());

    // Proper nouns.
    if has_upper && has_lower {
        multiplier *= 1.2;
    }
    // Multi-word names, likely organizations or people.
    if name.contains(' ') {
        multiplier *= 1.3;
    }
    // Acronyms.
    let len = name.chars().count();
    if has_upper && !has_lower && (2..=5).contains(&len) {
        multiplier *= 1.5;
    }
    multiplier
}

/// Composite centrality score: degree weighted by log-scaled mentions,
/// shaped by the quality multiplier.
pub fn entity_score(name: &str, degree: usize, mention_count: u64) -> f64 {
    let base = degree as f64 * (1.0 + (1.0 + mention_count as f64).ln());
    base * quality_multiplier(name)
}
