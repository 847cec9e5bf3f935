/// Embedding provider errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("batch shape mismatch: sent {sent} texts, got {got} vectors")]
    BatchShapeMismatch { sent: usize, got: usize },
}
