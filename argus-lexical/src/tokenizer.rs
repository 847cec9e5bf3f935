use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    // Unreachable panic: the pattern is a literal.
    Regex::new(r"[A-Za-z0-9_]+").unwrap()
});

/// Lower-cased alphanumeric/underscore tokens, in document order.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("Acme-Corp breached: RANSOMWARE_2024!"),
            vec!["acme", "corp", "breached", "ransomware_2024"]
        );
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("  \n\t ").is_empty());
    }
}
