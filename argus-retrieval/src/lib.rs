//! # argus-retrieval
//!
//! The hybrid ranker: implements the full query-time pipeline.
//!
//! Stage 1: candidate gathering (vector + lexical + graph bias → additive
//! fusion → preliminary cut). Stage 2: cross-encoder rerank (embedding-
//! cosine fallback) × temporal decay × graph weight → dedup → snippets.

pub mod cache;
mod engine;
pub mod fusion;
pub mod rerank;
pub mod snippets;
pub mod temporal;

pub use cache::CachedEmbedder;
pub use engine::HybridRanker;
pub use fusion::Candidate;
pub use rerank::Reranker;
