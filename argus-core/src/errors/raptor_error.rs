/// RAPTOR build errors. Any of these aborts the build and leaves the
/// previous node collection untouched.
#[derive(Debug, thiserror::Error)]
pub enum RaptorError {
    #[error("embedding step failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("clustering step failed: {reason}")]
    ClusteringFailed { reason: String },

    #[error("node staging failed: {reason}")]
    StagingFailed { reason: String },

    #[error("build cancelled")]
    Cancelled,
}
