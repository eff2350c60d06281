use crate::types::Timestamp;

/// Domain-level errors for request gating.
///
/// Cache-store and worker-submission failures have their own error types in
/// the crates that own those seams; this enum covers what can go wrong with
/// the request itself before it is allowed near a worker.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request failed its schema contract.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request's deadline was already in the past at evaluation time.
    #[error("Work request {uuid} will not be handled as timeout of {timeout} is in the past")]
    ExpiredRequest { uuid: String, timeout: Timestamp },

    /// An unclassified internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
