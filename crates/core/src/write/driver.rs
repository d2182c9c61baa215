//! Batched write driver.
//!
//! Drives a [`BatchRequest`] to completion against a [`BatchWriteBackend`]
//! that may reject any subset of a batch. Each round resubmits only what the
//! backend reported as unprocessed, waiting an exponentially growing delay in
//! between. The loop is bounded by the invocation deadline, not by an attempt
//! counter.

use std::sync::Arc;
use std::time::Duration;

use super::{
    BackoffPolicy, BatchRequest, BatchWriteBackend, RemainingTime, UnprocessedSet, WriteError,
};

/// Largest number of items a single `BatchWriteItem` call accepts.
///
/// Inbound batches are sized upstream; the driver only warns when the limit
/// is exceeded.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Outcome of a batched write that reached the table in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of backend calls made.
    pub attempts: u32,
    pub items_written: usize,
}

/// Retry state machine for partially failing batch writes.
#[derive(Clone)]
pub struct BatchWriteDriver {
    backend: Arc<dyn BatchWriteBackend>,
    policy: BackoffPolicy,
}

impl BatchWriteDriver {
    pub fn new(backend: Arc<dyn BatchWriteBackend>, policy: BackoffPolicy) -> Self {
        Self { backend, policy }
    }

    /// Writes every item in `request`, starting from the first attempt.
    pub async fn write(
        &self,
        request: BatchRequest,
        deadline: &dyn RemainingTime,
    ) -> Result<WriteSummary, WriteError> {
        self.write_from(request, 0, deadline).await
    }

    /// Writes every item in `request`, treating the first submission as
    /// attempt number `attempt` for backoff purposes.
    ///
    /// All tables and items share one attempt counter.
    pub async fn write_from(
        &self,
        request: BatchRequest,
        attempt: u32,
        deadline: &dyn RemainingTime,
    ) -> Result<WriteSummary, WriteError> {
        let items_written = request.item_count();

        if request.is_empty() {
            tracing::debug!("Nothing to write, skipping batch write");
            return Ok(WriteSummary {
                attempts: 0,
                items_written: 0,
            });
        }

        if items_written > MAX_BATCH_WRITE_ITEMS {
            tracing::warn!(
                items = items_written,
                limit = MAX_BATCH_WRITE_ITEMS,
                "Batch exceeds the per-call item limit; the backend may reject it"
            );
        }

        let mut pending = request;
        let mut attempt = attempt;
        let mut calls: u32 = 0;

        loop {
            calls += 1;

            let unprocessed: UnprocessedSet =
                self.backend.batch_write(&pending).await.map_err(|err| {
                    tracing::error!(attempt, error = %err, "Batch write call failed");
                    WriteError::Backend(err)
                })?;

            if unprocessed.is_empty() {
                tracing::info!(
                    attempts = calls,
                    items = items_written,
                    "Batch write complete"
                );
                return Ok(WriteSummary {
                    attempts: calls,
                    items_written,
                });
            }

            let remaining: Duration = deadline.remaining();
            let Some(delay) = self.policy.delay_for(attempt, remaining) else {
                tracing::error!(
                    attempt,
                    remaining_ms = remaining.as_millis() as u64,
                    unprocessed = unprocessed.item_count(),
                    "Not enough time left to retry unprocessed items"
                );
                return Err(WriteError::DeadlineExceeded {
                    attempt,
                    remaining_ms: remaining.as_millis() as u64,
                    unprocessed: unprocessed.item_count(),
                });
            };

            tracing::info!(
                attempt,
                unprocessed = unprocessed.item_count(),
                delay_ms = delay.as_millis() as u64,
                remaining_ms = remaining.as_millis() as u64,
                "Unprocessed items remain, retrying"
            );

            tokio::time::sleep(delay).await;

            pending = unprocessed;
            attempt += 1;
        }
    }
}
