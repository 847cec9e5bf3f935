/// Knowledge graph errors.
///
/// Load failure from a corrupt file is deliberately *not* represented here:
/// the store falls back to an empty graph and logs the data loss. Only
/// write-side failures surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to persist graph to {path}: {reason}")]
    PersistFailed { path: String, reason: String },

    #[error("graph serialization failed: {reason}")]
    Serialization { reason: String },
}
