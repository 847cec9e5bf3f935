//! # argus-graph
//!
//! Entity co-mention knowledge graph fed by every ingested chunk.
//!
//! Nodes are named entities (with mention counts) and documents (for
//! provenance); undirected edges count how often two entities co-occur in
//! the same chunk. The graph is append-only during normal operation, owned
//! by a single logical writer, reloaded from its persistence file at start
//! and saved after each ingestion batch.
//!
//! Read APIs: quality-filtered entity centrality ranking, Louvain community
//! detection, and query-entity → document boost maps for the hybrid ranker.

pub mod communities;
pub mod extract;
pub mod policy;
mod store;

pub use communities::Community;
pub use extract::{normalize_entity, NaiveEntityExtractor};
pub use store::{EntityRank, GraphStore};
