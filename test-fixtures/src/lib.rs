//! Deterministic in-memory fakes shared by integration tests across crates.
//!
//! All fixtures are pure and reproducible: the embedder hashes tokens into
//! buckets so cosine similarity tracks token overlap, the store keeps
//! records in insertion order, and the flaky collaborators fail only when a
//! test flips their switch.

mod embedder;
mod services;
mod store;

pub use embedder::HashEmbedder;
pub use services::{FlakySummarizer, OverlapCrossEncoder};
pub use store::MemoryVectorStore;

use argus_core::{Chunk, ChunkMetadata};
use chrono::{DateTime, Duration, Utc};

/// Lowercased alphanumeric tokens, the shared vocabulary of all fixtures.
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A chunk with plausible OSINT metadata, `age_days` old relative to `now`.
pub fn sample_chunk(doc_id: &str, chunk_index: u32, text: &str, age_days: i64, now: DateTime<Utc>) -> Chunk {
    Chunk::new(
        text,
        ChunkMetadata {
            url: Some(format!("https://feeds.example.com/{doc_id}")),
            host: Some("feeds.example.com".to_string()),
            doc_id: doc_id.to_string(),
            title: Some(format!("Report {doc_id}")),
            published_at: Some(now - Duration::days(age_days)),
            chunk_index,
            source: Some("rss".to_string()),
        },
    )
}
