use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid ranker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Nearest chunks pulled from the vector index per query.
    pub vector_candidates: usize,
    /// Ids pulled from the lexical index per query.
    pub lexical_candidates: usize,
    /// Candidates surviving the preliminary cut into reranking.
    pub prelim_pool: usize,
    /// Weight of the graph signal in the preliminary score.
    pub graph_score_weight: f64,
    /// Whether query-entity graph bias is applied at all.
    pub use_graph_bias: bool,
    /// Documents requested from the graph boost map per query.
    pub graph_boost_docs: usize,
    /// Baseline temporal horizon (days); halved for recency queries.
    pub default_recent_days: u32,
    /// Snippet length cap (characters).
    pub snippet_max_chars: usize,
    /// Entries in the embedding memo cache.
    pub embed_cache_entries: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_candidates: defaults::DEFAULT_VECTOR_CANDIDATES,
            lexical_candidates: defaults::DEFAULT_LEXICAL_CANDIDATES,
            prelim_pool: defaults::DEFAULT_PRELIM_POOL,
            graph_score_weight: defaults::DEFAULT_GRAPH_SCORE_WEIGHT,
            use_graph_bias: defaults::DEFAULT_USE_GRAPH_BIAS,
            graph_boost_docs: defaults::DEFAULT_DOC_BOOST_LIMIT,
            default_recent_days: defaults::DEFAULT_RECENT_DAYS,
            snippet_max_chars: defaults::DEFAULT_SNIPPET_MAX_CHARS,
            embed_cache_entries: defaults::DEFAULT_EMBED_CACHE_ENTRIES,
        }
    }
}
