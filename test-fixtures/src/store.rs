use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use argus_core::errors::{ArgusResult, StoreError};
use argus_core::traits::{IVectorStore, ScoredRecord, StoredRecord, VectorRecord};

/// In-memory vector collection. Insertion order is preserved (upserting an
/// existing id keeps its position), `replace_all` swaps the whole set under
/// one write lock, and `fail_queries` lets tests exercise the degraded
/// vector-signal path.
pub struct MemoryVectorStore {
    model: String,
    dims: usize,
    records: RwLock<Vec<VectorRecord>>,
    fail_queries: AtomicBool,
}

impl MemoryVectorStore {
    pub fn new(model: impl Into<String>, dims: usize) -> Self {
        Self {
            model: model.into(),
            dims,
            records: RwLock::new(Vec::new()),
            fail_queries: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `vector_query` fail with a backend error.
    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::Relaxed);
    }

    fn check_dims(&self, records: &[VectorRecord]) -> Result<(), StoreError> {
        for record in records {
            if record.embedding.len() != self.dims {
                return Err(StoreError::DimensionMismatch {
                    expected: self.dims,
                    got: record.embedding.len(),
                });
            }
        }
        Ok(())
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 1.0;
    }
    1.0 - dot / (na * nb)
}

fn poisoned() -> StoreError {
    StoreError::Backend {
        reason: "store lock poisoned".to_string(),
    }
}

impl IVectorStore for MemoryVectorStore {
    fn upsert(&self, records: &[VectorRecord]) -> ArgusResult<()> {
        self.check_dims(records)?;
        let mut all = self.records.write().map_err(|_| poisoned())?;
        for record in records {
            if let Some(existing) = all.iter_mut().find(|r| r.id == record.id) {
                *existing = record.clone();
            } else {
                all.push(record.clone());
            }
        }
        Ok(())
    }

    fn fetch_all(&self, limit: Option<usize>) -> ArgusResult<Vec<StoredRecord>> {
        let all = self.records.read().map_err(|_| poisoned())?;
        let take = limit.unwrap_or(all.len());
        Ok(all
            .iter()
            .take(take)
            .map(|r| StoredRecord {
                id: r.id.clone(),
                text: r.text.clone(),
                metadata: r.metadata.clone(),
            })
            .collect())
    }

    fn get(&self, ids: &[String]) -> ArgusResult<Vec<StoredRecord>> {
        let all = self.records.read().map_err(|_| poisoned())?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                all.iter().find(|r| &r.id == id).map(|r| StoredRecord {
                    id: r.id.clone(),
                    text: r.text.clone(),
                    metadata: r.metadata.clone(),
                })
            })
            .collect())
    }

    fn vector_query(&self, embedding: &[f32], k: usize) -> ArgusResult<Vec<ScoredRecord>> {
        if self.fail_queries.load(Ordering::Relaxed) {
            return Err(StoreError::Backend {
                reason: "injected query failure".to_string(),
            }
            .into());
        }
        let all = self.records.read().map_err(|_| poisoned())?;
        let mut scored: Vec<ScoredRecord> = all
            .iter()
            .map(|r| ScoredRecord {
                id: r.id.clone(),
                text: r.text.clone(),
                metadata: r.metadata.clone(),
                distance: cosine_distance(embedding, &r.embedding),
            })
            .collect();
        scored.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    fn replace_all(&self, records: &[VectorRecord]) -> ArgusResult<()> {
        self.check_dims(records)?;
        let mut all = self.records.write().map_err(|_| poisoned())?;
        *all = records.to_vec();
        Ok(())
    }

    fn count(&self) -> ArgusResult<usize> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }

    fn embedding_model(&self) -> &str {
        &self.model
    }
}
