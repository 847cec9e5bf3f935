use serde::{Deserialize, Serialize};

use crate::errors::ArgusResult;

/// A record written into a vector collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    /// Loosely-typed at the store boundary; typed structs
    /// ([`crate::ChunkMetadata`], [`crate::NodeMetadata`]) convert through
    /// `to_value`/`from_value` on either side.
    pub metadata: serde_json::Value,
}

/// A record read back without similarity context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub text: String,
    pub metadata: serde_json::Value,
}

/// A record returned from a vector-similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: String,
    pub text: String,
    pub metadata: serde_json::Value,
    /// Cosine distance: lower is closer.
    pub distance: f32,
}

/// One vector collection (chunks or RAPTOR nodes), keyed by embedding-model
/// identity so vectors of different dimensionality are never silently mixed.
///
/// Implementations must reject upserts whose dimension or model identity
/// disagrees with the collection rather than corrupt the index.
pub trait IVectorStore: Send + Sync {
    fn upsert(&self, records: &[VectorRecord]) -> ArgusResult<()>;

    /// All current records, oldest first, up to `limit` when given.
    fn fetch_all(&self, limit: Option<usize>) -> ArgusResult<Vec<StoredRecord>>;

    /// Records for the given ids; unknown ids are skipped, order follows `ids`.
    fn get(&self, ids: &[String]) -> ArgusResult<Vec<StoredRecord>>;

    /// Top-k by cosine similarity to `embedding`.
    fn vector_query(&self, embedding: &[f32], k: usize) -> ArgusResult<Vec<ScoredRecord>>;

    /// Atomically replace the entire collection with `records`. Concurrent
    /// readers observe either the fully-old or fully-new set, never a
    /// partial one.
    fn replace_all(&self, records: &[VectorRecord]) -> ArgusResult<()>;

    fn count(&self) -> ArgusResult<usize>;

    /// Embedding model this collection is keyed by.
    fn embedding_model(&self) -> &str;
}
