//! Query-biased snippet extraction.
//!
//! Picks the sentence of a hit most similar to the query in embedding space,
//! optionally joined with the following sentence when the best one is short,
//! and reports the snippet's byte span within the original text.

use argus_core::errors::ArgusResult;
use argus_core::traits::IEmbedder;

use crate::rerank::dot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A sentence with its byte span in the source text.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

/// Split on `.`/`?`/`!` followed by whitespace, keeping byte offsets so the
/// snippet span can be reported without re-searching the text.
fn sentence_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut after_terminator = false;
    for (i, ch) in text.char_indices() {
        if after_terminator && ch.is_whitespace() {
            if start < i {
                spans.push(Span { start, end: i });
            }
            start = i + ch.len_utf8();
            after_terminator = false;
            continue;
        }
        after_terminator = matches!(ch, '.' | '?' | '!');
        if ch.is_whitespace() && start == i {
            // Skip leading whitespace between sentences.
            start = i + ch.len_utf8();
        }
    }
    if start < text.len() {
        spans.push(Span { start, end: text.len() });
    }
    spans
}

/// Byte index of the boundary after at most `max_chars` characters.
fn char_floor(text: &str, max_chars: usize) -> usize {
    text.char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i)
}

/// Select the snippet of `text` most relevant to the already-embedded query.
pub fn best_snippet(
    query_embedding: &[f32],
    text: &str,
    embedder: &dyn IEmbedder,
    max_chars: usize,
) -> ArgusResult<Snippet> {
    if text.is_empty() {
        return Ok(Snippet { text: String::new(), start: 0, end: 0 });
    }
    let spans = sentence_spans(text);
    if spans.is_empty() {
        let end = char_floor(text, max_chars);
        return Ok(Snippet { text: text[..end].trim().to_string(), start: 0, end });
    }

    let sentences: Vec<String> = spans.iter().map(|s| text[s.start..s.end].to_string()).collect();
    let embeddings = embedder.embed_batch(&sentences)?;
    let best = embeddings
        .iter()
        .map(|e| dot(query_embedding, e))
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map_or(0, |(i, _)| i);

    // Extend to the next sentence when the best one is short.
    let mut chosen = spans[best];
    let best_chars = sentences[best].chars().count();
    if best + 1 < spans.len() && best_chars < max_chars / 2 {
        chosen.end = spans[best + 1].end;
    }

    let raw = &text[chosen.start..chosen.end];
    let cut = char_floor(raw, max_chars);
    let snippet = raw[..cut].trim_end();
    Ok(Snippet {
        text: snippet.to_string(),
        start: chosen.start,
        end: chosen.start + snippet.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeywordEmbedder;

    // Axis 0 lights up on "malware", axis 1 on everything else.
    impl IEmbedder for KeywordEmbedder {
        fn embed(&self, text: &str) -> ArgusResult<Vec<f32>> {
            if text.to_lowercase().contains("malware") {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }
        fn embed_batch(&self, texts: &[String]) -> ArgusResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "keyword"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn splits_on_terminators_with_offsets() {
        let text = "First one. Second two! Third?  Fourth";
        let spans = sentence_spans(text);
        let sentences: Vec<&str> = spans.iter().map(|s| &text[s.start..s.end]).collect();
        assert_eq!(sentences, vec!["First one.", "Second two!", "Third?", "Fourth"]);
    }

    #[test]
    fn picks_the_most_similar_sentence() {
        let text = "The weather was mild. New malware targets routers. Stocks were flat.";
        let q = KeywordEmbedder.embed("malware").unwrap();
        let snip = best_snippet(&q, text, &KeywordEmbedder, 260).unwrap();
        assert_eq!(snip.text, "New malware targets routers.");
        assert_eq!(&text[snip.start..snip.end], snip.text);
    }

    #[test]
    fn short_best_sentence_pulls_in_the_next() {
        let text = "Malware. The campaign abused a router flaw across several regions.";
        let q = KeywordEmbedder.embed("malware").unwrap();
        let snip = best_snippet(&q, text, &KeywordEmbedder, 260).unwrap();
        assert!(snip.text.starts_with("Malware. The campaign"));
    }

    #[test]
    fn respects_the_character_cap() {
        let long = "malware ".repeat(100);
        let q = KeywordEmbedder.embed("malware").unwrap();
        let snip = best_snippet(&q, &long, &KeywordEmbedder, 40).unwrap();
        assert!(snip.text.chars().count() <= 40);
        assert_eq!(&long[snip.start..snip.end], snip.text);
    }

    #[test]
    fn empty_text_yields_empty_snippet() {
        let q = vec![1.0, 0.0];
        let snip = best_snippet(&q, "", &KeywordEmbedder, 260).unwrap();
        assert_eq!(snip, Snippet { text: String::new(), start: 0, end: 0 });
    }
}
