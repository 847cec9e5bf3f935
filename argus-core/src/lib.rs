//! # argus-core
//!
//! Foundation crate for the Argus OSINT retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ArgusConfig;
pub use errors::{ArgusError, ArgusResult};
pub use models::{Chunk, ChunkMetadata, Hit, NodeMetadata, RaptorNode, SourceRef};
