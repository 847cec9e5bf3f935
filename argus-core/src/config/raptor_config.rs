use serde::{Deserialize, Serialize};

use super::defaults;

/// Hierarchical clustering index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaptorConfig {
    /// Below this corpus size a build logs a soft warning and proceeds.
    pub min_docs: usize,
    /// Chunks fetched per build, at most.
    pub max_docs: usize,
    /// Average cluster size `choose_k` aims for.
    pub target_cluster_size: usize,
    /// Upper bound on the cluster count.
    pub k_max: usize,
    /// Expected chunks per node, used by the incremental-rebuild policy.
    pub chunks_per_node: usize,
    /// Working-set cap that bounds clustering cost.
    pub working_set_cap: usize,
}

impl Default for RaptorConfig {
    fn default() -> Self {
        Self {
            min_docs: defaults::DEFAULT_RAPTOR_MIN_DOCS,
            max_docs: defaults::DEFAULT_RAPTOR_MAX_DOCS,
            target_cluster_size: defaults::DEFAULT_TARGET_CLUSTER_SIZE,
            k_max: defaults::DEFAULT_K_MAX,
            chunks_per_node: defaults::DEFAULT_CHUNKS_PER_NODE,
            working_set_cap: defaults::DEFAULT_WORKING_SET_CAP,
        }
    }
}
