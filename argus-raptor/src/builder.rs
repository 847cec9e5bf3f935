//! Node builds: incremental policy, clustering, summarization, atomic swap.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use argus_core::config::RaptorConfig;
use argus_core::constants::{MIN_RAPTOR_CHUNK_CHARS, PROVENANCE_SOURCE_CAP};
use argus_core::errors::{ArgusResult, RaptorError};
use argus_core::traits::{IEmbedder, ISummarizer, IVectorStore, VectorRecord};
use argus_core::{ChunkMetadata, NodeMetadata, RaptorNode, SourceRef};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::clustering::{choose_k, kmeans_labels};
use crate::summarize::summarize_cluster;

/// Cooperative cancellation handle, checked between cluster summarizations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a build did. Skips are normal operation, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The incremental policy or an empty corpus left the index as-is.
    Skipped { reason: String },
    Built { nodes: usize },
}

pub struct RaptorBuilder {
    chunks: Arc<dyn IVectorStore>,
    nodes: Arc<dyn IVectorStore>,
    embedder: Arc<dyn IEmbedder>,
    summarizer: Arc<dyn ISummarizer>,
    config: RaptorConfig,
}

impl RaptorBuilder {
    pub fn new(
        chunks: Arc<dyn IVectorStore>,
        nodes: Arc<dyn IVectorStore>,
        embedder: Arc<dyn IEmbedder>,
        summarizer: Arc<dyn ISummarizer>,
        config: RaptorConfig,
    ) -> Self {
        Self { chunks, nodes, embedder, summarizer, config }
    }

    /// Rebuild the node collection from the chunk corpus.
    ///
    /// The new node set is staged completely and then swapped in with one
    /// `replace_all`. Any failure, and cancellation, leaves the previous
    /// node set untouched.
    pub fn build_nodes(
        &self,
        topic_hint: &str,
        incremental: bool,
        cancel: &CancelToken,
    ) -> ArgusResult<BuildOutcome> {
        let records = self.chunks.fetch_all(Some(self.config.max_docs))?;

        if incremental {
            let existing = self.nodes.count()?;
            let expected = (records.len() / self.config.chunks_per_node).max(1);
            let threshold = (existing as f64 * 0.25).max(5.0);
            if existing > 0 && (expected as f64 - existing as f64) < threshold {
                info!(existing, expected, "incremental build skipped, not enough growth");
                return Ok(BuildOutcome::Skipped {
                    reason: format!("{existing} nodes cover {} chunks", records.len()),
                });
            }
            info!(existing, expected, "incremental build triggered");
        }

        // Drop fragments too short to carry a topic.
        let mut items: Vec<(String, ChunkMetadata)> = records
            .into_iter()
            .filter(|r| r.text.chars().count() > MIN_RAPTOR_CHUNK_CHARS)
            .filter_map(|r| match ChunkMetadata::from_value(&r.metadata) {
                Ok(meta) => Some((r.text, meta)),
                Err(e) => {
                    warn!(id = %r.id, error = %e, "skipping chunk with malformed metadata");
                    None
                }
            })
            .collect();

        if items.is_empty() {
            warn!("no usable chunks, leaving node collection unchanged");
            return Ok(BuildOutcome::Skipped { reason: "empty corpus".to_string() });
        }
        if items.len() < self.config.min_docs {
            warn!(chunks = items.len(), min = self.config.min_docs, "building from a small corpus");
        }
        if items.len() > self.config.working_set_cap {
            debug!(cap = self.config.working_set_cap, was = items.len(), "capping working set");
            items.truncate(self.config.working_set_cap);
        }

        let texts: Vec<String> = items.iter().map(|(text, _)| text.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .map_err(|e| RaptorError::EmbeddingFailed { reason: e.to_string() })?;

        let k = choose_k(items.len(), self.config.target_cluster_size, self.config.k_max);
        let labels = kmeans_labels(&embeddings, k)?;
        debug!(chunks = items.len(), k, "clustered working set");

        let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            clusters.entry(label).or_default().push(i);
        }

        let built_at = Utc::now();
        let mut staged: Vec<RaptorNode> = Vec::with_capacity(clusters.len());
        for (label, members) in clusters {
            if cancel.is_cancelled() {
                info!(staged = staged.len(), "build cancelled, node collection unchanged");
                return Err(RaptorError::Cancelled.into());
            }

            let cluster_texts: Vec<String> = members.iter().map(|&i| items[i].0.clone()).collect();
            let sources: Vec<SourceRef> = members
                .iter()
                .take(PROVENANCE_SOURCE_CAP)
                .map(|&i| {
                    let meta = &items[i].1;
                    SourceRef {
                        url: meta.url.clone(),
                        host: meta.host.clone(),
                        title: meta.title.clone(),
                        published_at: meta.published_at,
                        doc_id: Some(meta.doc_id.clone()),
                    }
                })
                .collect();

            let summary = summarize_cluster(
                self.summarizer.as_ref(),
                if topic_hint.is_empty() { "osint" } else { topic_hint },
                &cluster_texts,
                &sources,
            );
            let sources_summary = sources
                .iter()
                .take(5)
                .map(|s| {
                    format!(
                        "{}:{}",
                        s.host.as_deref().unwrap_or("unknown"),
                        s.title.as_deref().unwrap_or("untitled")
                    )
                })
                .collect::<Vec<_>>()
                .join("; ");

            staged.push(RaptorNode {
                id: RaptorNode::new_id(),
                summary_text: summary,
                embedding: Vec::new(),
                metadata: NodeMetadata {
                    cluster_label: label as u32,
                    built_at,
                    topic_hint: topic_hint.to_string(),
                    source_count: sources.len(),
                    sources_summary,
                    incremental_build: incremental,
                    sources,
                },
            });
        }

        let summaries: Vec<String> = staged.iter().map(|n| n.summary_text.clone()).collect();
        let node_embeddings = self
            .embedder
            .embed_batch(&summaries)
            .map_err(|e| RaptorError::EmbeddingFailed { reason: e.to_string() })?;
        for (node, embedding) in staged.iter_mut().zip(node_embeddings) {
            node.embedding = embedding;
        }

        let node_records: Vec<VectorRecord> = staged
            .iter()
            .map(|node| VectorRecord {
                id: node.id.clone(),
                text: node.summary_text.clone(),
                embedding: node.embedding.clone(),
                metadata: node.metadata.to_value(),
            })
            .collect();
        self.nodes
            .replace_all(&node_records)
            .map_err(|e| RaptorError::StagingFailed { reason: e.to_string() })?;

        info!(nodes = node_records.len(), incremental, "node build complete");
        Ok(BuildOutcome::Built { nodes: node_records.len() })
    }
}
