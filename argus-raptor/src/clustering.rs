//! Cluster-count selection and a deterministic k-means.
//!
//! Initialization picks evenly-spaced points instead of random ones, so a
//! build over the same corpus always produces the same clusters.

use argus_core::errors::RaptorError;

const MAX_ITERATIONS: usize = 20;

/// Number of clusters for `n` points aiming at `target` points per cluster.
/// Small corpora collapse into a single cluster.
pub fn choose_k(n: usize, target: usize, k_max: usize) -> usize {
    if n <= target {
        return 1;
    }
    let k = (n as f64 / target.max(5) as f64).round() as usize;
    k.clamp(1, k_max.max(1))
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// Assign each embedding to one of `k` clusters. Returns a label per input.
///
/// Mean centroids, cosine assignment, evenly-spaced initialization. Labels
/// are dense in `0..k` but clusters may end up empty for degenerate inputs.
pub fn kmeans_labels(embeddings: &[Vec<f32>], k: usize) -> Result<Vec<usize>, RaptorError> {
    if embeddings.is_empty() || k == 0 {
        return Err(RaptorError::ClusteringFailed {
            reason: "nothing to cluster".to_string(),
        });
    }
    let dim = embeddings[0].len();
    if embeddings.iter().any(|e| e.len() != dim) {
        return Err(RaptorError::ClusteringFailed {
            reason: "inconsistent embedding dimensions".to_string(),
        });
    }

    let k = k.min(embeddings.len());
    let step = embeddings.len() / k;
    let mut centroids: Vec<Vec<f32>> = (0..k)
        .map(|i| embeddings[(i * step).min(embeddings.len() - 1)].clone())
        .collect();

    let mut labels = vec![0usize; embeddings.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, embedding) in embeddings.iter().enumerate() {
            let best = centroids
                .iter()
                .enumerate()
                .map(|(c, centroid)| (c, cosine_similarity(embedding, centroid)))
                .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map_or(0, |(c, _)| c);
            if labels[i] != best {
                labels[i] = best;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![vec![0.0f32; dim]; k];
        let mut counts = vec![0usize; k];
        for (i, embedding) in embeddings.iter().enumerate() {
            counts[labels[i]] += 1;
            for (j, value) in embedding.iter().enumerate() {
                sums[labels[i]][j] += value;
            }
        }
        for c in 0..k {
            if counts[c] > 0 {
                for j in 0..dim {
                    centroids[c][j] = sums[c][j] / counts[c] as f32;
                }
            }
        }
    }

    Ok(labels)
}
