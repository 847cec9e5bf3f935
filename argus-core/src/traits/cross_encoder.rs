use crate::errors::ArgusResult;

/// Joint (query, text) relevance scorer. May be unavailable or fail at any
/// call; callers must catch and degrade to the embedding-cosine fallback.
pub trait ICrossEncoder: Send + Sync {
    /// Score each text against the query. Higher is more relevant.
    fn score_batch(&self, query: &str, texts: &[String]) -> ArgusResult<Vec<f32>>;
    fn is_available(&self) -> bool;
}
