//! In-memory embedding cache.
//!
//! Wraps any [`IEmbedder`] with a bounded moka cache keyed by a blake3 hash
//! of the input text, so repeated queries and re-ingested chunks skip the
//! embedding call.

use std::sync::Arc;

use argus_core::errors::ArgusResult;
use argus_core::traits::IEmbedder;
use moka::sync::Cache;
use tracing::debug;

pub struct CachedEmbedder {
    inner: Arc<dyn IEmbedder>,
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn IEmbedder>, max_entries: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(max_entries),
        }
    }

    /// Cache keys mix in the model name so swapping embedders cannot
    /// serve stale vectors of the wrong dimension.
    fn key(&self, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.inner.name().as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl IEmbedder for CachedEmbedder {
    fn embed(&self, text: &str) -> ArgusResult<Vec<f32>> {
        let key = self.key(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.as_ref().clone());
        }
        let embedding = self.inner.embed(text)?;
        self.cache.insert(key, Arc::new(embedding.clone()));
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> ArgusResult<Vec<Vec<f32>>> {
        // Only the misses go to the backend, in one batch call.
        let keys: Vec<String> = texts.iter().map(|t| self.key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys
            .iter()
            .map(|k| self.cache.get(k).map(|v| v.as_ref().clone()))
            .collect();

        let miss_indices: Vec<usize> = out
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
            .collect();
        if !miss_indices.is_empty() {
            debug!(misses = miss_indices.len(), total = texts.len(), "embedding cache misses");
            let miss_texts: Vec<String> = miss_indices.iter().map(|&i| texts[i].clone()).collect();
            let embeddings = self.inner.embed_batch(&miss_texts)?;
            for (&i, embedding) in miss_indices.iter().zip(embeddings) {
                self.cache.insert(keys[i].clone(), Arc::new(embedding.clone()));
                out[i] = Some(embedding);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
