//! Node builds against in-memory stores: incremental policy, provenance,
//! extractive fallback, atomic swap, cancellation.

use std::sync::Arc;

use argus_core::config::RaptorConfig;
use argus_core::traits::{IEmbedder, IVectorStore, VectorRecord};
use argus_core::{NodeMetadata, RaptorNode};
use argus_raptor::{query_nodes, BuildOutcome, CancelToken, RaptorBuilder};
use chrono::Utc;
use test_fixtures::{sample_chunk, FlakySummarizer, HashEmbedder, MemoryVectorStore};

struct Rig {
    chunks: Arc<MemoryVectorStore>,
    nodes: Arc<MemoryVectorStore>,
    embedder: Arc<HashEmbedder>,
    summarizer: Arc<FlakySummarizer>,
    builder: RaptorBuilder,
}

fn rig_with(config: RaptorConfig, node_dims: usize) -> Rig {
    let embedder = Arc::new(HashEmbedder::new(64));
    let chunks = Arc::new(MemoryVectorStore::new(embedder.name(), embedder.dimensions()));
    let nodes = Arc::new(MemoryVectorStore::new(embedder.name(), node_dims));
    let summarizer = Arc::new(FlakySummarizer::new());
    let builder = RaptorBuilder::new(
        chunks.clone(),
        nodes.clone(),
        embedder.clone(),
        summarizer.clone(),
        config,
    );
    Rig { chunks, nodes, embedder, summarizer, builder }
}

fn rig() -> Rig {
    rig_with(RaptorConfig::default(), 64)
}

/// Two topical groups, every text comfortably above the length filter.
fn seed_chunks(rig: &Rig, n: usize) {
    let now = Utc::now();
    let records: Vec<VectorRecord> = (0..n)
        .map(|i| {
            let text = if i % 2 == 0 {
                format!("Report {i}: Umbra router malware campaign shows persistent beaconing and staged payload delivery across regions.")
            } else {
                format!("Report {i}: coastal shipping disruption continues as port authorities extend inspection backlogs another week.")
            };
            let chunk = sample_chunk(&format!("doc-{i}"), 0, &text, (i % 30) as i64, now);
            VectorRecord {
                id: chunk.id.clone(),
                text: chunk.text.clone(),
                embedding: rig.embedder.embed(&chunk.text).unwrap(),
                metadata: chunk.metadata.to_value(),
            }
        })
        .collect();
    rig.chunks.upsert(&records).unwrap();
}

fn seed_old_nodes(rig: &Rig, n: usize, dims: usize) {
    let records: Vec<VectorRecord> = (0..n)
        .map(|i| {
            let metadata = NodeMetadata {
                cluster_label: i as u32,
                built_at: Utc::now(),
                topic_hint: "old".to_string(),
                source_count: 0,
                sources_summary: String::new(),
                incremental_build: false,
                sources: Vec::new(),
            };
            VectorRecord {
                id: RaptorNode::new_id(),
                text: format!("old node {i}"),
                embedding: vec![0.1; dims],
                metadata: metadata.to_value(),
            }
        })
        .collect();
    rig.nodes.upsert(&records).unwrap();
}

#[test]
fn build_creates_nodes_with_provenance() {
    let r = rig();
    seed_chunks(&r, 120);

    let outcome = r.builder.build_nodes("routers", false, &CancelToken::new()).unwrap();
    let BuildOutcome::Built { nodes } = outcome else {
        panic!("expected a build, got {outcome:?}");
    };
    assert!(nodes >= 1);
    assert_eq!(r.nodes.count().unwrap(), nodes);

    let hits = query_nodes(r.nodes.as_ref(), r.embedder.as_ref(), "umbra malware", 3).unwrap();
    assert!(!hits.is_empty());
    for hit in &hits {
        assert!(!hit.text.is_empty());
        assert!(hit.metadata.source_count >= 1);
        assert!(hit.metadata.sources.len() <= 8);
        assert_eq!(hit.metadata.topic_hint, "routers");
    }
}

#[test]
fn silent_summarizer_falls_back_to_extractive_nodes() {
    let r = rig();
    seed_chunks(&r, 60);
    r.summarizer.set_silent(true);

    r.builder.build_nodes("routers", false, &CancelToken::new()).unwrap();
    let all = r.nodes.fetch_all(None).unwrap();
    assert!(!all.is_empty());
    for node in &all {
        assert!(node.text.starts_with("Topic: routers"), "unexpected summary: {}", node.text);
    }
}

#[test]
fn incremental_build_skips_without_enough_growth() {
    let r = rig();
    seed_chunks(&r, 1000);
    seed_old_nodes(&r, 20, 64);

    let outcome = r.builder.build_nodes("", true, &CancelToken::new()).unwrap();
    assert!(matches!(outcome, BuildOutcome::Skipped { .. }));
    // 1000 chunks / 50 per node = 20 expected, no growth over 20 existing.
    assert_eq!(r.nodes.count().unwrap(), 20);
    assert_eq!(r.nodes.fetch_all(Some(1)).unwrap()[0].text, "old node 0");
}

#[test]
fn incremental_build_triggers_on_growth_and_replaces_old_nodes() {
    let config = RaptorConfig {
        max_docs: 5000,
        ..RaptorConfig::default()
    };
    let r = rig_with(config, 64);
    seed_chunks(&r, 5000);
    seed_old_nodes(&r, 20, 64);

    let outcome = r.builder.build_nodes("", true, &CancelToken::new()).unwrap();
    assert!(matches!(outcome, BuildOutcome::Built { .. }));
    let all = r.nodes.fetch_all(None).unwrap();
    assert!(all.iter().all(|n| !n.text.starts_with("old node")));
    for node in &all {
        let meta = NodeMetadata::from_value(&node.metadata).unwrap();
        assert!(meta.incremental_build);
    }
}

#[test]
fn staging_failure_leaves_the_old_nodes_untouched() {
    // Node collection keyed to a different dimensionality: the final
    // replace_all is rejected and nothing before it may leak through.
    let r = rig_with(RaptorConfig::default(), 8);
    seed_chunks(&r, 80);
    seed_old_nodes(&r, 3, 8);

    let err = r.builder.build_nodes("", false, &CancelToken::new());
    assert!(err.is_err());
    assert_eq!(r.nodes.count().unwrap(), 3);
    assert_eq!(r.nodes.fetch_all(Some(1)).unwrap()[0].text, "old node 0");
}

#[test]
fn cancellation_aborts_before_the_swap() {
    let r = rig();
    seed_chunks(&r, 80);
    seed_old_nodes(&r, 2, 64);

    let cancel = CancelToken::new();
    cancel.cancel();
    let err = r.builder.build_nodes("", false, &cancel);
    assert!(err.is_err());
    assert_eq!(r.nodes.count().unwrap(), 2);
}

#[test]
fn short_fragments_are_filtered_out() {
    let r = rig();
    let records: Vec<VectorRecord> = (0..10)
        .map(|i| {
            let chunk = sample_chunk(&format!("doc-{i}"), 0, "too short", 1, Utc::now());
            VectorRecord {
                id: chunk.id.clone(),
                text: chunk.text.clone(),
                embedding: r.embedder.embed(&chunk.text).unwrap(),
                metadata: chunk.metadata.to_value(),
            }
        })
        .collect();
    r.chunks.upsert(&records).unwrap();

    let outcome = r.builder.build_nodes("", false, &CancelToken::new()).unwrap();
    assert!(matches!(outcome, BuildOutcome::Skipped { .. }));
    assert_eq!(r.nodes.count().unwrap(), 0);
}

#[test]
fn blank_query_returns_nothing() {
    let r = rig();
    let hits = query_nodes(r.nodes.as_ref(), r.embedder.as_ref(), "  ", 5).unwrap();
    assert!(hits.is_empty());
}
