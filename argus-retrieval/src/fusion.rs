//! Additive candidate fusion across the lexical, vector, and graph signals.
//!
//! Signal scores are presence indicators (1.0 per source that surfaced the
//! candidate) plus the graph boost, so no cross-method score normalization
//! is needed before the preliminary cut.

use argus_core::ChunkMetadata;

/// A query-time candidate. Exists only for the duration of one query.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
    /// 1.0 when the vector index surfaced this candidate.
    pub score_vector: f64,
    /// 1.0 when the lexical index surfaced this candidate.
    pub score_lexical: f64,
    /// Graph boost from query-entity document matches.
    pub score_graph: f64,
    /// Recency weight, filled in after the preliminary cut.
    pub temporal_weight: f64,
    /// Capped multiplicative graph weight, filled in after the cut.
    pub graph_weight: f64,
}

impl Candidate {
    pub fn new(id: String, text: String, metadata: ChunkMetadata) -> Self {
        Self {
            id,
            text,
            metadata,
            score_vector: 0.0,
            score_lexical: 0.0,
            score_graph: 0.0,
            temporal_weight: 1.0,
            graph_weight: 1.0,
        }
    }

    /// Preliminary fusion score: `vector + lexical + weight × graph`.
    pub fn prelim_score(&self, graph_score_weight: f64) -> f64 {
        self.score_vector + self.score_lexical + graph_score_weight * self.score_graph
    }

    /// Mild multiplicative graph factor, capped so graph bias cannot
    /// dominate the rerank score.
    pub fn capped_graph_weight(&self) -> f64 {
        1.0 + self.score_graph.min(1.0)
    }
}

/// Keep the `pool` best candidates by preliminary score, descending.
/// Stable: ties keep gathering order (vector candidates first).
pub fn prelim_cut(mut candidates: Vec<Candidate>, graph_score_weight: f64, pool: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.prelim_score(graph_score_weight)
            .partial_cmp(&a.prelim_score(graph_score_weight))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(pool);
    candidates
}
