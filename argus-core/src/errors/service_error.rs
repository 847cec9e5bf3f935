/// Errors from opaque external services (cross-encoder, summarizer).
///
/// Callers must treat these as recoverable and take the corresponding
/// fallback path; a timeout is reported as `Unavailable`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} unavailable")]
    Unavailable { service: String },

    #[error("{service} call failed: {reason}")]
    CallFailed { service: String, reason: String },
}
