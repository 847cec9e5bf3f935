//! # argus-engine
//!
//! Composition root of the Argus OSINT retrieval engine.
//!
//! Owns the shared state (vector collections, lexical index, co-mention
//! graph) and wires the injected collaborators into the ingestion pipeline,
//! the hybrid ranker, and the RAPTOR builder. Everything upward of this
//! crate (HTTP APIs, schedulers, collectors) is out of scope.

mod engine;
pub mod telemetry;

pub use engine::ArgusEngine;
