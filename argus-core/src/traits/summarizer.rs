use crate::errors::ArgusResult;

/// Generative summarizer. Optional collaborator: failure or an empty
/// response triggers the extractive fallback at the call site.
pub trait ISummarizer: Send + Sync {
    fn summarize(&self, prompt: &str) -> ArgusResult<String>;
}
