//! Cross-encoder reranking with a latched embedding-cosine fallback.
//!
//! The first cross-encoder failure flips a latch: every later query in this
//! process uses the cosine fallback until `reset` is called explicitly.
//! Each fallback-scored batch is reported to the caller so the degradation
//! lands in the returned hits, not only in logs.

use std::sync::atomic::{AtomicBool, Ordering};

use argus_core::errors::ArgusResult;
use argus_core::traits::{ICrossEncoder, IEmbedder};
use tracing::warn;

/// Scores for one candidate batch, with the degradation marker.
#[derive(Debug, Clone)]
pub struct RerankOutcome {
    pub scores: Vec<f32>,
    /// True when the embedding-cosine fallback produced these scores.
    pub fallback_used: bool,
}

#[derive(Debug, Default)]
pub struct Reranker {
    degraded: AtomicBool,
}

impl Reranker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fallback latch is set.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Re-enable the cross-encoder after a degradation (test hook and
    /// operator escape hatch).
    pub fn reset(&self) {
        self.degraded.store(false, Ordering::Relaxed);
    }

    /// Score `texts` against `query`, preferring the cross-encoder.
    pub fn score(
        &self,
        query: &str,
        texts: &[String],
        cross_encoder: &dyn ICrossEncoder,
        embedder: &dyn IEmbedder,
    ) -> ArgusResult<RerankOutcome> {
        if texts.is_empty() {
            return Ok(RerankOutcome {
                scores: Vec::new(),
                fallback_used: self.is_degraded(),
            });
        }

        if !self.is_degraded() && cross_encoder.is_available() {
            match cross_encoder.score_batch(query, texts) {
                Ok(scores) if scores.len() == texts.len() => {
                    return Ok(RerankOutcome {
                        scores,
                        fallback_used: false,
                    });
                }
                Ok(scores) => {
                    warn!(
                        sent = texts.len(),
                        got = scores.len(),
                        "cross-encoder returned a partial batch, latching fallback"
                    );
                    self.degraded.store(true, Ordering::Relaxed);
                }
                Err(e) => {
                    warn!(error = %e, "cross-encoder failed, latching embedding-cosine fallback");
                    self.degraded.store(true, Ordering::Relaxed);
                }
            }
        }

        let scores = cosine_scores(query, texts, embedder)?;
        Ok(RerankOutcome {
            scores,
            fallback_used: true,
        })
    }
}

/// Cosine similarity between the query embedding and each text embedding.
/// Embeddings are unit-normalized, so the dot product suffices.
fn cosine_scores(query: &str, texts: &[String], embedder: &dyn IEmbedder) -> ArgusResult<Vec<f32>> {
    let query_embedding = embedder.embed(query)?;
    let text_embeddings = embedder.embed_batch(texts)?;
    Ok(text_embeddings
        .iter()
        .map(|embedding| dot(&query_embedding, embedding))
        .collect())
}

pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
