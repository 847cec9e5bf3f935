//! The hybrid search pipeline.
//!
//! Candidate gathering unions the vector and lexical signals and biases the
//! pool with query-entity document matches from the co-mention graph. Each
//! signal degrades independently: a failing store query, a poisoned index
//! lock, or an empty graph only narrows the pool, it never fails the query.
//! Only embedding the query itself is fatal.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use argus_core::config::RetrievalConfig;
use argus_core::errors::ArgusResult;
use argus_core::traits::{ICrossEncoder, IEmbedder, IEntityExtractor, IVectorStore};
use argus_core::{ChunkMetadata, Hit};
use argus_graph::GraphStore;
use argus_lexical::LexicalIndex;
use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::CachedEmbedder;
use crate::fusion::{prelim_cut, Candidate};
use crate::rerank::Reranker;
use crate::snippets::best_snippet;
use crate::temporal::temporal_weight;

pub struct HybridRanker {
    store: Arc<dyn IVectorStore>,
    lexical: Arc<RwLock<LexicalIndex>>,
    graph: Arc<RwLock<GraphStore>>,
    embedder: Arc<CachedEmbedder>,
    cross_encoder: Arc<dyn ICrossEncoder>,
    extractor: Arc<dyn IEntityExtractor>,
    reranker: Reranker,
    config: RetrievalConfig,
}

impl HybridRanker {
    pub fn new(
        store: Arc<dyn IVectorStore>,
        lexical: Arc<RwLock<LexicalIndex>>,
        graph: Arc<RwLock<GraphStore>>,
        embedder: Arc<dyn IEmbedder>,
        cross_encoder: Arc<dyn ICrossEncoder>,
        extractor: Arc<dyn IEntityExtractor>,
        config: RetrievalConfig,
    ) -> Self {
        let embedder = Arc::new(CachedEmbedder::new(embedder, config.embed_cache_entries));
        Self {
            store,
            lexical,
            graph,
            embedder,
            cross_encoder,
            extractor,
            reranker: Reranker::new(),
            config,
        }
    }

    /// Whether the cross-encoder has been latched into fallback mode.
    pub fn rerank_degraded(&self) -> bool {
        self.reranker.is_degraded()
    }

    /// Clear the rerank fallback latch.
    pub fn reset_rerank(&self) {
        self.reranker.reset();
    }

    pub fn hybrid_search(&self, query: &str, k: usize) -> ArgusResult<Vec<Hit>> {
        if k == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(query)?;

        let mut candidates = self.gather_candidates(query, &query_embedding)?;
        if self.config.use_graph_bias {
            self.apply_graph_bias(query, &mut candidates);
        }
        debug!(candidates = candidates.len(), "gathered hybrid candidates");

        let mut pool = prelim_cut(
            candidates,
            self.config.graph_score_weight,
            self.config.prelim_pool,
        );

        let now = Utc::now();
        for candidate in &mut pool {
            candidate.temporal_weight = temporal_weight(
                candidate.metadata.published_at,
                query,
                self.config.default_recent_days,
                now,
            );
            candidate.graph_weight = candidate.capped_graph_weight();
        }

        let texts: Vec<String> = pool.iter().map(|c| c.text.clone()).collect();
        let outcome =
            self.reranker
                .score(query, &texts, self.cross_encoder.as_ref(), self.embedder.as_ref())?;

        let mut ranked: Vec<(Candidate, f64)> = pool
            .into_iter()
            .zip(&outcome.scores)
            .map(|(c, &rerank)| {
                let score = f64::from(rerank) * c.temporal_weight * c.graph_weight;
                (c, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // One hit per document; chunks without a doc id stand alone.
        let mut seen_docs: HashSet<String> = HashSet::new();
        let mut hits = Vec::with_capacity(k);
        for (candidate, score) in ranked {
            let doc_key = if candidate.metadata.doc_id.is_empty() {
                candidate.id.clone()
            } else {
                candidate.metadata.doc_id.clone()
            };
            if !seen_docs.insert(doc_key) {
                continue;
            }
            let snippet = best_snippet(
                &query_embedding,
                &candidate.text,
                self.embedder.as_ref(),
                self.config.snippet_max_chars,
            )?;
            hits.push(Hit {
                id: candidate.id,
                text: candidate.text,
                metadata: candidate.metadata,
                snippet: snippet.text,
                snippet_span: (snippet.start, snippet.end),
                score,
                rerank_fallback: outcome.fallback_used,
            });
            if hits.len() == k {
                break;
            }
        }
        Ok(hits)
    }

    /// Union the vector and lexical candidate sets. Presence in a signal
    /// scores 1.0; duplicates accumulate both.
    fn gather_candidates(&self, query: &str, query_embedding: &[f32]) -> ArgusResult<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();

        match self.store.vector_query(query_embedding, self.config.vector_candidates) {
            Ok(records) => {
                for record in records {
                    let Ok(metadata) = ChunkMetadata::from_value(&record.metadata) else {
                        warn!(id = %record.id, "skipping candidate with malformed metadata");
                        continue;
                    };
                    let mut candidate = Candidate::new(record.id.clone(), record.text, metadata);
                    candidate.score_vector = 1.0;
                    by_id.insert(record.id, candidates.len());
                    candidates.push(candidate);
                }
            }
            Err(e) => warn!(error = %e, "vector query failed, continuing lexical-only"),
        }

        let lexical_hits = match self.lexical.read() {
            Ok(index) => index.query(query, self.config.lexical_candidates),
            Err(_) => {
                warn!("lexical index lock poisoned, continuing vector-only");
                Vec::new()
            }
        };

        let mut missing: Vec<String> = Vec::new();
        for (id, _) in &lexical_hits {
            if let Some(&i) = by_id.get(id) {
                candidates[i].score_lexical = 1.0;
            } else {
                missing.push(id.clone());
            }
        }
        if !missing.is_empty() {
            match self.store.get(&missing) {
                Ok(records) => {
                    for record in records {
                        let Ok(metadata) = ChunkMetadata::from_value(&record.metadata) else {
                            warn!(id = %record.id, "skipping candidate with malformed metadata");
                            continue;
                        };
                        let mut candidate = Candidate::new(record.id.clone(), record.text, metadata);
                        candidate.score_lexical = 1.0;
                        by_id.insert(record.id, candidates.len());
                        candidates.push(candidate);
                    }
                }
                Err(e) => warn!(error = %e, "fetch of lexical-only candidates failed"),
            }
        }

        Ok(candidates)
    }

    /// Boost candidates whose document co-mentions the query's entities.
    /// Any failure here degrades to zero boost.
    fn apply_graph_bias(&self, query: &str, candidates: &mut [Candidate]) {
        let entities = self.extractor.extract(query);
        if entities.is_empty() {
            return;
        }
        let boosts = match self.graph.read() {
            Ok(graph) => graph.doc_boosts(&entities, self.config.graph_boost_docs),
            Err(_) => {
                warn!("graph lock poisoned, skipping graph bias");
                return;
            }
        };
        if boosts.is_empty() {
            return;
        }
        for candidate in candidates.iter_mut() {
            if let Some(boost) = boosts.get(&candidate.metadata.doc_id) {
                candidate.score_graph += boost;
            }
        }
        debug!(entities = entities.len(), boosted_docs = boosts.len(), "applied graph bias");
    }
}
