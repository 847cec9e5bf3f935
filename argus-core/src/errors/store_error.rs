/// Vector/chunk store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid metadata: {reason}")]
    InvalidMetadata { reason: String },

    #[error("embedding dimension mismatch: collection has {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("embedding model mismatch: collection keyed by {expected}, got {got}")]
    ModelMismatch { expected: String, got: String },

    #[error("store backend failure: {reason}")]
    Backend { reason: String },
}
