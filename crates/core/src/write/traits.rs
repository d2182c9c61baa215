use async_trait::async_trait;

use super::{BackendError, BatchRequest, UnprocessedSet};

/// Storage backend able to accept a multi-table batch write.
#[async_trait]
pub trait BatchWriteBackend: Send + Sync {
    /// Submits the whole request as one batch call.
    ///
    /// Returns the subset the table did not process, which is empty when every
    /// item was accepted. A call-level failure is returned as `Err`.
    async fn batch_write(&self, request: &BatchRequest) -> Result<UnprocessedSet, BackendError>;
}
