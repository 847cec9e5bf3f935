use argus_core::errors::ArgusResult;
use argus_core::traits::IEmbedder;

use crate::tokens;

/// Bag-of-words embedder: each token hashes into one of `dims` buckets and
/// the vector is unit-normalized, so cosine similarity between two texts
/// rises with their token overlap. Deterministic across runs and platforms.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(64)
    }
}

fn fnv1a(token: &str) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

impl IEmbedder for HashEmbedder {
    fn embed(&self, text: &str) -> ArgusResult<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dims];
        for token in tokens(text) {
            let bucket = (fnv1a(&token) % self.dims as u64) as usize;
            vector[bucket] += 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> ArgusResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }

    fn is_available(&self) -> bool {
        true
    }
}
