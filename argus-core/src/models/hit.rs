//! A ranked search result returned by hybrid search.

use serde::{Deserialize, Serialize};

use super::ChunkMetadata;

/// One hit from `hybrid_search`. The snippet is the sentence (or two) of
/// the chunk most similar to the query, with its character span in `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
    pub snippet: String,
    /// `(start, end)` byte offsets of the snippet within `text`.
    pub snippet_span: (usize, usize),
    pub score: f64,
    /// True when the cross-encoder was unavailable and the embedding-cosine
    /// fallback produced this score. Degradations are observable, not
    /// log-only.
    pub rerank_fallback: bool,
}
