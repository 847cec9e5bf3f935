//! End-to-end hybrid search over an in-memory corpus: signal fusion, graph
//! bias, temporal ordering, degradation paths, dedup, and snippets.

use std::sync::{Arc, RwLock};

use argus_core::config::{GraphConfig, RetrievalConfig};
use argus_core::traits::{IEmbedder, IEntityExtractor, IVectorStore, VectorRecord};
use argus_core::Chunk;
use argus_graph::{GraphStore, NaiveEntityExtractor};
use argus_lexical::LexicalIndex;
use argus_retrieval::HybridRanker;
use chrono::Utc;
use test_fixtures::{sample_chunk, HashEmbedder, MemoryVectorStore, OverlapCrossEncoder};

struct Harness {
    store: Arc<MemoryVectorStore>,
    cross_encoder: Arc<OverlapCrossEncoder>,
    ranker: HybridRanker,
}

fn harness(chunks: &[Chunk]) -> Harness {
    let embedder = Arc::new(HashEmbedder::new(64));
    let store = Arc::new(MemoryVectorStore::new(embedder.name(), embedder.dimensions()));
    let lexical = Arc::new(RwLock::new(LexicalIndex::new()));
    let graph = Arc::new(RwLock::new(GraphStore::load(&GraphConfig::default())));
    let cross_encoder = Arc::new(OverlapCrossEncoder::new());
    let extractor = NaiveEntityExtractor;

    let records: Vec<VectorRecord> = chunks
        .iter()
        .map(|chunk| VectorRecord {
            id: chunk.id.clone(),
            text: chunk.text.clone(),
            embedding: embedder.embed(&chunk.text).unwrap(),
            metadata: chunk.metadata.to_value(),
        })
        .collect();
    store.upsert(&records).unwrap();
    {
        let mut lex = lexical.write().unwrap();
        let mut g = graph.write().unwrap();
        for chunk in chunks {
            lex.add_chunk(&chunk.id, &chunk.text);
            g.add_chunk(&chunk.id, &extractor.extract(&chunk.text), &chunk.metadata);
        }
    }

    let ranker = HybridRanker::new(
        store.clone(),
        lexical,
        graph,
        embedder,
        cross_encoder.clone(),
        Arc::new(NaiveEntityExtractor),
        RetrievalConfig::default(),
    );
    Harness { store, cross_encoder, ranker }
}

fn corpus() -> Vec<Chunk> {
    let now = Utc::now();
    vec![
        sample_chunk(
            "doc-malware",
            0,
            "Umbra malware targets Acme routers. The implant survives reboots and beacons hourly.",
            1,
            now,
        ),
        sample_chunk(
            "doc-earnings",
            0,
            "Quarterly earnings beat expectations. Revenue grew on cloud subscriptions.",
            2,
            now,
        ),
        sample_chunk(
            "doc-weather",
            0,
            "Coastal storms expected through the weekend. Authorities issued travel warnings.",
            3,
            now,
        ),
    ]
}

#[test]
fn relevant_chunk_ranks_first_with_a_valid_snippet() {
    let h = harness(&corpus());
    let hits = h.ranker.hybrid_search("Umbra malware on Acme routers", 3).unwrap();

    assert!(!hits.is_empty());
    assert_eq!(hits[0].metadata.doc_id, "doc-malware");
    assert!(!hits[0].rerank_fallback);

    let (start, end) = hits[0].snippet_span;
    assert_eq!(&hits[0].text[start..end], hits[0].snippet);
    assert!(hits[0].snippet.chars().count() <= 260);
}

#[test]
fn zero_k_and_blank_queries_return_nothing() {
    let h = harness(&corpus());
    assert!(h.ranker.hybrid_search("malware", 0).unwrap().is_empty());
    assert!(h.ranker.hybrid_search("   ", 5).unwrap().is_empty());
}

#[test]
fn k_bounds_the_result_count() {
    let h = harness(&corpus());
    let hits = h.ranker.hybrid_search("the", 1).unwrap();
    assert!(hits.len() <= 1);
}

#[test]
fn vector_failure_degrades_to_lexical_only() {
    let h = harness(&corpus());
    h.store.fail_queries(true);

    let hits = h.ranker.hybrid_search("Umbra malware routers", 3).unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].metadata.doc_id, "doc-malware");
}

#[test]
fn cross_encoder_failure_latches_the_fallback() {
    let h = harness(&corpus());
    h.cross_encoder.set_broken(true);

    let hits = h.ranker.hybrid_search("Umbra malware", 3).unwrap();
    assert!(hits.iter().all(|hit| hit.rerank_fallback));
    assert!(h.ranker.rerank_degraded());

    // Healing the encoder is not enough; the latch holds until reset.
    h.cross_encoder.set_broken(false);
    let hits = h.ranker.hybrid_search("Umbra malware", 3).unwrap();
    assert!(hits.iter().all(|hit| hit.rerank_fallback));

    h.ranker.reset_rerank();
    let hits = h.ranker.hybrid_search("Umbra malware", 3).unwrap();
    assert!(hits.iter().all(|hit| !hit.rerank_fallback));
}

#[test]
fn fallback_ranking_still_finds_the_relevant_chunk() {
    let h = harness(&corpus());
    h.cross_encoder.set_broken(true);

    let hits = h.ranker.hybrid_search("Umbra malware on Acme routers", 3).unwrap();
    assert_eq!(hits[0].metadata.doc_id, "doc-malware");
}

#[test]
fn graph_bias_lifts_co_mentioned_documents() {
    let now = Utc::now();
    // doc-linked co-mentions the query entities, doc-plain shares only the
    // generic vocabulary.
    let linked = sample_chunk(
        "doc-linked",
        0,
        "Infrastructure overlap ties the campaigns together. Umbra and Acme appear in the same indicators.",
        2,
        now,
    );
    let plain = sample_chunk(
        "doc-plain",
        0,
        "Infrastructure overlap suggests a shared operator behind the campaigns.",
        2,
        now,
    );

    let h = harness(&[linked, plain]);
    let hits = h.ranker.hybrid_search("Umbra and Acme infrastructure overlap", 2).unwrap();

    assert_eq!(hits[0].metadata.doc_id, "doc-linked");
}

#[test]
fn hits_are_deduplicated_by_doc_id() {
    let now = Utc::now();
    let chunks = vec![
        sample_chunk("doc-repeat", 0, "Umbra malware beacons hourly from routers.", 1, now),
        sample_chunk("doc-repeat", 1, "Umbra malware persists across router reboots.", 1, now),
        sample_chunk("doc-other", 0, "Unrelated shipping delays continue at the port.", 1, now),
    ];
    let h = harness(&chunks);

    let hits = h.ranker.hybrid_search("Umbra malware routers", 5).unwrap();
    let repeats = hits.iter().filter(|hit| hit.metadata.doc_id == "doc-repeat").count();
    assert_eq!(repeats, 1);
}

#[test]
fn fresh_coverage_outranks_stale_coverage() {
    let now = Utc::now();
    let text = "Umbra malware campaign hits Acme routers across three regions.";
    let chunks = vec![
        sample_chunk("doc-stale", 0, text, 400, now),
        sample_chunk("doc-fresh", 0, text, 1, now),
    ];
    let h = harness(&chunks);

    let hits = h.ranker.hybrid_search("Umbra malware routers", 2).unwrap();
    assert_eq!(hits[0].metadata.doc_id, "doc-fresh");
    assert!(hits[0].score > hits[1].score);
}
