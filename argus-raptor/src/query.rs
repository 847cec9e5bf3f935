//! Query over the node collection only.

use argus_core::errors::ArgusResult;
use argus_core::traits::{IEmbedder, IVectorStore};
use argus_core::NodeMetadata;
use tracing::warn;

/// A node returned from `query_nodes`, with its parsed metadata.
#[derive(Debug, Clone)]
pub struct NodeHit {
    pub id: String,
    pub text: String,
    pub metadata: NodeMetadata,
    /// Cosine distance: lower is closer.
    pub distance: f32,
}

/// Embed the query and search the node collection. Nodes whose metadata no
/// longer parses are skipped, not fatal.
pub fn query_nodes(
    nodes: &dyn IVectorStore,
    embedder: &dyn IEmbedder,
    query: &str,
    k: usize,
) -> ArgusResult<Vec<NodeHit>> {
    if k == 0 || query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let embedding = embedder.embed(query)?;
    let records = nodes.vector_query(&embedding, k)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match NodeMetadata::from_value(&record.metadata) {
            Ok(metadata) => Some(NodeHit {
                id: record.id,
                text: record.text,
                metadata,
                distance: record.distance,
            }),
            Err(e) => {
                warn!(id = %record.id, error = %e, "skipping node with malformed metadata");
                None
            }
        })
        .collect())
}
