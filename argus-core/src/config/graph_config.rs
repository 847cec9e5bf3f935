use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Persistence file for the serialized graph.
    pub path: PathBuf,
    /// Co-mention pairs recorded per chunk, at most.
    pub max_pairs_per_chunk: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::DEFAULT_GRAPH_PATH),
            max_pairs_per_chunk: defaults::DEFAULT_MAX_PAIRS_PER_CHUNK,
        }
    }
}
