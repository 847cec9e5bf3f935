use std::sync::atomic::{AtomicBool, Ordering};

use argus_core::errors::{ArgusResult, ServiceError};
use argus_core::traits::{ICrossEncoder, ISummarizer};

use crate::tokens;

/// Cross-encoder fake scoring by query/text token overlap. Flip `broken`
/// to exercise the latched rerank fallback.
#[derive(Default)]
pub struct OverlapCrossEncoder {
    broken: AtomicBool,
}

impl OverlapCrossEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::Relaxed);
    }
}

impl ICrossEncoder for OverlapCrossEncoder {
    fn score_batch(&self, query: &str, texts: &[String]) -> ArgusResult<Vec<f32>> {
        if self.broken.load(Ordering::Relaxed) {
            return Err(ServiceError::CallFailed {
                service: "cross-encoder".to_string(),
                reason: "injected failure".to_string(),
            }
            .into());
        }
        let query_tokens = tokens(query);
        Ok(texts
            .iter()
            .map(|text| {
                if query_tokens.is_empty() {
                    return 0.0;
                }
                let text_tokens = tokens(text);
                let overlap = query_tokens.iter().filter(|t| text_tokens.contains(t)).count();
                overlap as f32 / query_tokens.len() as f32
            })
            .collect())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Summarizer fake. Returns a one-line digest of the prompt, or an empty
/// string when `go_silent` is set so callers must take the extractive path.
#[derive(Default)]
pub struct FlakySummarizer {
    go_silent: AtomicBool,
}

impl FlakySummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_silent(&self, silent: bool) {
        self.go_silent.store(silent, Ordering::Relaxed);
    }
}

impl ISummarizer for FlakySummarizer {
    fn summarize(&self, prompt: &str) -> ArgusResult<String> {
        if self.go_silent.load(Ordering::Relaxed) {
            return Ok(String::new());
        }
        let digest: Vec<String> = tokens(prompt).into_iter().take(12).collect();
        Ok(format!("Summary: {}", digest.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_scores_rank_relevant_text_higher() {
        let encoder = OverlapCrossEncoder::new();
        let scores = encoder
            .score_batch(
                "acme router malware",
                &["acme malware on routers".to_string(), "weather report".to_string()],
            )
            .unwrap();
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn broken_encoder_errors() {
        let encoder = OverlapCrossEncoder::new();
        encoder.set_broken(true);
        assert!(encoder.score_batch("q", &["t".to_string()]).is_err());
    }

    #[test]
    fn silent_summarizer_returns_empty() {
        let summarizer = FlakySummarizer::new();
        summarizer.set_silent(true);
        assert_eq!(summarizer.summarize("anything").unwrap(), "");
    }
}
