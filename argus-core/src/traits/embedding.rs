use crate::errors::ArgusResult;

/// Text embedding provider. Output vectors are unit-normalized and of
/// fixed dimension; empty input yields empty output, never a partial batch.
pub trait IEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> ArgusResult<Vec<f32>>;
    fn embed_batch(&self, texts: &[String]) -> ArgusResult<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
    /// Model identity; vector collections are keyed by this.
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
}
