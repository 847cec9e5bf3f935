//! # argus-raptor
//!
//! Hierarchical clustering index over the chunk corpus.
//!
//! A build fetches the corpus, clusters chunk embeddings with k-means, and
//! summarizes each cluster into one node (generative summarizer when it
//! answers, extractive otherwise). The finished node set replaces the node
//! collection in a single atomic swap, so a failed or cancelled build never
//! leaves a half-written index behind.

pub mod builder;
pub mod clustering;
mod query;
mod summarize;

pub use builder::{BuildOutcome, CancelToken, RaptorBuilder};
pub use query::{query_nodes, NodeHit};
