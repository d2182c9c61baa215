use thiserror::Error;

/// Errors returned by the storage call itself.
///
/// These are distinct from a successful call that reports unprocessed items,
/// and the driver never retries them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Throughput exceeded: {0}")]
    Throttled(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Terminal failures of a batched write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("Batch write call failed: {0}")]
    Backend(#[from] BackendError),
    #[error(
        "Deadline exceeded after attempt {attempt}: {unprocessed} items unprocessed, {remaining_ms}ms remaining"
    )]
    DeadlineExceeded {
        attempt: u32,
        remaining_ms: u64,
        unprocessed: usize,
    },
}
