//! Per-subsystem error enums, aggregated into [`ArgusError`].

mod embedding_error;
mod graph_error;
mod raptor_error;
mod retrieval_error;
mod service_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use graph_error::GraphError;
pub use raptor_error::RaptorError;
pub use retrieval_error::RetrievalError;
pub use service_error::ServiceError;
pub use store_error::StoreError;

/// Configuration loading/parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config: {reason}")]
    Parse { reason: String },
}

/// Top-level error type for the Argus workspace.
#[derive(Debug, thiserror::Error)]
pub enum ArgusError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Raptor(#[from] RaptorError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias used across the workspace.
pub type ArgusResult<T> = Result<T, ArgusError>;
