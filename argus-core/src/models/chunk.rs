//! The atomic retrievable unit and its metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// Metadata attached to every chunk. Named optional fields instead of a
/// loose map; validated once at the ingestion boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    pub url: Option<String>,
    pub host: Option<String>,
    /// Identity of the source document. Required.
    pub doc_id: String,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Position of this chunk within its document.
    pub chunk_index: u32,
    /// Where the document came from (rss, web, seed, ...).
    pub source: Option<String>,
}

impl ChunkMetadata {
    /// Contract check at the ingestion boundary. Violations are fatal to
    /// the caller, never silently coerced.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.doc_id.trim().is_empty() {
            return Err(StoreError::InvalidMetadata {
                reason: "doc_id must be non-empty".to_string(),
            });
        }
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(StoreError::InvalidMetadata {
                    reason: "url present but empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serialize into the loosely-typed form the store boundary uses.
    pub fn to_value(&self) -> serde_json::Value {
        // Struct has no non-serializable fields; this cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Deserialize from the store boundary. Malformed metadata is a
    /// contract violation, surfaced immediately.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, StoreError> {
        serde_json::from_value(value.clone()).map_err(|e| StoreError::InvalidMetadata {
            reason: e.to_string(),
        })
    }
}

/// A bounded span of document text. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Deterministic chunk id from `(doc_id, chunk_index)` so re-ingestion
    /// of the same document upserts instead of duplicating.
    pub fn derive_id(doc_id: &str, chunk_index: u32) -> String {
        let hash = blake3::hash(format!("{doc_id}\u{1f}{chunk_index}").as_bytes());
        hash.to_hex().to_string()
    }

    pub fn new(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        let id = Self::derive_id(&metadata.doc_id, metadata.chunk_index);
        Self {
            id,
            text: text.into(),
            metadata,
        }
    }
}
