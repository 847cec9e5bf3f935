//! Cluster summarization: generative first, extractive fallback.

use argus_core::constants::PROVENANCE_SOURCE_CAP;
use argus_core::traits::ISummarizer;
use argus_core::SourceRef;
use tracing::debug;

/// Character budget for the excerpt block of a generative prompt.
const PROMPT_EXCERPT_BUDGET: usize = 2800;
/// Longest chunks kept by the extractive summary.
const EXTRACTIVE_CHUNKS: usize = 5;
/// Per-chunk truncation in the extractive summary.
const EXTRACTIVE_CHUNK_CHARS: usize = 200;
/// Hosts listed in the sources line.
const SUMMARY_HOSTS: usize = 5;

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Pack texts in order until the character budget runs out. A lead text
/// that alone exceeds the budget is truncated to it, so the prompt is
/// never left without excerpts.
fn pack_excerpts(texts: &[String], budget: usize) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut total = 0usize;
    for text in texts {
        if text.is_empty() {
            break;
        }
        let len = text.chars().count();
        if total + len + 1 > budget {
            if out.is_empty() {
                out.push(truncate_chars(text, budget));
            }
            break;
        }
        out.push(text.as_str());
        total += len + 1;
    }
    out.join("\n")
}

/// Summarize one cluster. A failing or empty generative answer falls back
/// to the extractive summary, so this always returns usable node text.
pub fn summarize_cluster(
    summarizer: &dyn ISummarizer,
    topic: &str,
    texts: &[String],
    sources: &[SourceRef],
) -> String {
    let prompt = format!(
        "Summarize the following intelligence excerpts about {topic}. \
         Keep key actors, indicators, and dates.\n\n{}",
        pack_excerpts(texts, PROMPT_EXCERPT_BUDGET)
    );
    match summarizer.summarize(&prompt) {
        Ok(summary) if !summary.trim().is_empty() => summary,
        Ok(_) => {
            debug!("summarizer returned empty text, using extractive summary");
            extractive_summary(topic, texts, sources)
        }
        Err(e) => {
            debug!(error = %e, "summarizer failed, using extractive summary");
            extractive_summary(topic, texts, sources)
        }
    }
}

/// Deterministic summary built from the longest chunks, a topic line, and a
/// deduplicated host list.
pub fn extractive_summary(topic: &str, texts: &[String], sources: &[SourceRef]) -> String {
    let mut sorted: Vec<&String> = texts.iter().collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

    let mut parts: Vec<String> = Vec::new();
    if !topic.is_empty() {
        parts.push(format!("Topic: {topic}"));
    }

    let mut hosts: Vec<&str> = Vec::new();
    for source in sources.iter().take(PROVENANCE_SOURCE_CAP) {
        if let Some(host) = source.host.as_deref() {
            if !host.is_empty() && !hosts.contains(&host) {
                hosts.push(host);
            }
        }
    }
    if !hosts.is_empty() {
        hosts.truncate(SUMMARY_HOSTS);
        parts.push(format!("Sources: {}", hosts.join(", ")));
    }

    for (i, text) in sorted.iter().take(EXTRACTIVE_CHUNKS).enumerate() {
        let truncated = truncate_chars(text, EXTRACTIVE_CHUNK_CHARS).trim();
        let ellipsis = if text.chars().count() > EXTRACTIVE_CHUNK_CHARS { "..." } else { "" };
        parts.push(format!("[{}] {truncated}{ellipsis}", i + 1));
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use argus_core::errors::{ArgusResult, ServiceError};

    struct EchoSummarizer;
    impl ISummarizer for EchoSummarizer {
        fn summarize(&self, _prompt: &str) -> ArgusResult<String> {
            Ok("A generated digest.".to_string())
        }
    }

    struct SilentSummarizer;
    impl ISummarizer for SilentSummarizer {
        fn summarize(&self, _prompt: &str) -> ArgusResult<String> {
            Ok("  ".to_string())
        }
    }

    struct FailingSummarizer;
    impl ISummarizer for FailingSummarizer {
        fn summarize(&self, _prompt: &str) -> ArgusResult<String> {
            Err(ServiceError::Unavailable { service: "summarizer".to_string() }.into())
        }
    }

    fn source(host: &str) -> SourceRef {
        SourceRef {
            host: Some(host.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn generative_answer_wins() {
        let summary = summarize_cluster(&EchoSummarizer, "routers", &["text".to_string()], &[]);
        assert_eq!(summary, "A generated digest.");
    }

    #[test]
    fn blank_answer_falls_back_to_extractive() {
        let texts = vec!["A longer description of the campaign.".to_string()];
        let summary = summarize_cluster(&SilentSummarizer, "routers", &texts, &[source("a.example")]);
        assert!(summary.starts_with("Topic: routers"));
        assert!(summary.contains("a.example"));
        assert!(summary.contains("[1]"));
    }

    #[test]
    fn error_falls_back_to_extractive() {
        let texts = vec!["chunk text".to_string()];
        let summary = summarize_cluster(&FailingSummarizer, "", &texts, &[]);
        assert!(summary.contains("[1] chunk text"));
    }

    #[test]
    fn extractive_prefers_longer_chunks_and_dedups_hosts() {
        let texts = vec!["short".to_string(), "a much longer and more informative chunk".to_string()];
        let sources = vec![source("a.example"), source("a.example"), source("b.example")];
        let summary = extractive_summary("t", &texts, &sources);
        assert!(summary.contains("[1] a much longer"));
        assert_eq!(summary.matches("a.example").count(), 1);
    }

    #[test]
    fn oversized_lead_text_still_yields_excerpts() {
        let texts = vec!["x".repeat(4000), "short follow-up".to_string()];
        let packed = pack_excerpts(&texts, PROMPT_EXCERPT_BUDGET);
        assert!(!packed.is_empty());
        assert!(packed.chars().count() <= PROMPT_EXCERPT_BUDGET);
    }

    #[test]
    fn long_chunks_are_truncated_with_ellipsis() {
        let texts = vec!["x".repeat(300)];
        let summary = extractive_summary("", &texts, &[]);
        assert!(summary.ends_with("..."));
    }
}
