//! Synthetic summary nodes produced by the hierarchical clustering index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Provenance pointer kept on a node for each representative source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRef {
    pub url: Option<String>,
    pub host: Option<String>,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub doc_id: Option<String>,
}

/// Metadata stored with each RAPTOR node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub cluster_label: u32,
    pub built_at: DateTime<Utc>,
    pub topic_hint: String,
    pub source_count: usize,
    /// Compact `host:title` digest of the top sources.
    pub sources_summary: String,
    pub incremental_build: bool,
    /// Up to 8 representative sources for provenance.
    pub sources: Vec<SourceRef>,
}

impl NodeMetadata {
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn from_value(value: &serde_json::Value) -> Result<Self, StoreError> {
        serde_json::from_value(value.clone()).map_err(|e| StoreError::InvalidMetadata {
            reason: e.to_string(),
        })
    }
}

/// One summary node over a cluster of chunks. Nodes are ephemeral relative
/// to chunks: a rebuild atomically replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaptorNode {
    pub id: String,
    pub summary_text: String,
    pub embedding: Vec<f32>,
    pub metadata: NodeMetadata,
}

impl RaptorNode {
    /// Fresh node id. Node ids are not stable across rebuilds.
    pub fn new_id() -> String {
        format!("node::{}", uuid::Uuid::new_v4().simple())
    }
}
