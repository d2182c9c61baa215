//! Invocation-level orchestration.
//!
//! Transforms every record of an inbound batch, groups the rows under the
//! destination table and hands them to the [`BatchWriteDriver`]. The outcome
//! is all-or-nothing: one summary on success, one error otherwise.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::record::{transform, RecordError};
use crate::write::{BackendError, BatchRequest, BatchWriteDriver, RemainingTime, WriteError};

/// What to do with a record that cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Abort the whole invocation before anything is written.
    #[default]
    FailBatch,
    /// Log the record and continue with the rest of the batch.
    Skip,
}

impl FromStr for MalformedRecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" | "fail_batch" => Ok(Self::FailBatch),
            "skip" => Ok(Self::Skip),
            other => Err(format!("Unknown malformed record policy: {other}")),
        }
    }
}

/// Terminal failures of one invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(#[from] ConfigError),
    #[error("Malformed record at index {index}: {source}")]
    MalformedRecord { index: usize, source: RecordError },
    #[error("Backend call failed: {0}")]
    BackendCall(BackendError),
    #[error(
        "Deadline exceeded after attempt {attempt}: {unprocessed} items unprocessed, {remaining_ms}ms remaining"
    )]
    DeadlineExceeded {
        attempt: u32,
        remaining_ms: u64,
        unprocessed: usize,
    },
}

impl From<WriteError> for IngestError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Backend(err) => Self::BackendCall(err),
            WriteError::DeadlineExceeded {
                attempt,
                remaining_ms,
                unprocessed,
            } => Self::DeadlineExceeded {
                attempt,
                remaining_ms,
                unprocessed,
            },
        }
    }
}

/// Outcome of a fully written batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub received: usize,
    pub skipped: usize,
    pub items_written: usize,
    pub attempts: u32,
}

/// Transforms and writes one inbound batch.
///
/// `payloads` are the transport-decoded record bodies in arrival order.
pub async fn ingest<'a, I>(
    payloads: I,
    table_name: &str,
    driver: &BatchWriteDriver,
    deadline: &dyn RemainingTime,
    policy: MalformedRecordPolicy,
) -> Result<IngestSummary, IngestError>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut request = BatchRequest::new();
    let mut received = 0;
    let mut skipped = 0;

    for (index, payload) in payloads.into_iter().enumerate() {
        received += 1;

        match transform(payload) {
            Ok(item) => request.push(table_name, item),
            Err(source) => match policy {
                MalformedRecordPolicy::FailBatch => {
                    tracing::error!(index, error = %source, "Malformed record, failing batch");
                    return Err(IngestError::MalformedRecord { index, source });
                }
                MalformedRecordPolicy::Skip => {
                    tracing::warn!(index, error = %source, "Skipping malformed record");
                    skipped += 1;
                }
            },
        }
    }

    tracing::info!(
        received,
        skipped,
        table = table_name,
        "Transformed inbound batch"
    );

    let summary = driver.write(request, deadline).await?;

    Ok(IngestSummary {
        received,
        skipped,
        items_written: summary.items_written,
        attempts: summary.attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::record::WriteItem;
    use crate::write::{BackoffPolicy, BatchWriteBackend, Deadline, UnprocessedSet};

    const TABLE: &str = "tweets";

    #[derive(Default)]
    struct RecordingBackend {
        responses: Mutex<VecDeque<Result<UnprocessedSet, BackendError>>>,
        requests: Mutex<Vec<BatchRequest>>,
    }

    impl RecordingBackend {
        fn with_responses(responses: Vec<Result<UnprocessedSet, BackendError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::default(),
            })
        }

        fn requests(&self) -> Vec<BatchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BatchWriteBackend for RecordingBackend {
        async fn batch_write(
            &self,
            request: &BatchRequest,
        ) -> Result<UnprocessedSet, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(BatchRequest::new()))
        }
    }

    fn tweet(name: &str, text: &str) -> Vec<u8> {
        serde_json::json!({
            "user": { "name": name },
            "created_at": "Mon Jan 01 12:00:00 +0000 2024",
            "text": text,
        })
        .to_string()
        .into_bytes()
    }

    fn row(name: &str, text: &str) -> WriteItem {
        WriteItem {
            username: name.to_string(),
            timestamp: "2024-01-01T12:00:00.000Z".to_string(),
            message: text.to_string(),
        }
    }

    async fn run(
        backend: Arc<RecordingBackend>,
        payloads: &[Vec<u8>],
        policy: MalformedRecordPolicy,
    ) -> Result<IngestSummary, IngestError> {
        let driver = BatchWriteDriver::new(backend, BackoffPolicy::default());
        ingest(
            payloads.iter().map(Vec::as_slice),
            TABLE,
            &driver,
            &Deadline::after(Duration::from_secs(60)),
            policy,
        )
        .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_every_record_to_table() {
        let backend = RecordingBackend::with_responses(vec![]);
        let payloads = vec![tweet("Ada", "one"), tweet("Grace", "two")];

        let summary = run(backend.clone(), &payloads, MalformedRecordPolicy::FailBatch)
            .await
            .unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                received: 2,
                skipped: 0,
                items_written: 2,
                attempts: 1,
            }
        );
        assert_eq!(
            backend.requests(),
            vec![BatchRequest::for_table(
                TABLE,
                vec![row("Ada", "one"), row("Grace", "two")]
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_record_fails_batch_before_writing() {
        let backend = RecordingBackend::with_responses(vec![]);
        let payloads = vec![tweet("Ada", "one"), b"not json".to_vec(), tweet("Grace", "two")];

        let result = run(backend.clone(), &payloads, MalformedRecordPolicy::FailBatch).await;

        assert!(matches!(
            result,
            Err(IngestError::MalformedRecord {
                index: 1,
                source: RecordError::InvalidJson(_)
            })
        ));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_policy_writes_remaining_records() {
        let backend = RecordingBackend::with_responses(vec![]);
        let payloads = vec![tweet("Ada", "one"), b"not json".to_vec(), tweet("Grace", "two")];

        let summary = run(backend.clone(), &payloads, MalformedRecordPolicy::Skip)
            .await
            .unwrap();

        assert_eq!(summary.received, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.items_written, 2);
        assert_eq!(
            backend.requests()[0].items(TABLE).unwrap(),
            &[row("Ada", "one"), row("Grace", "two")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_records_skipped_writes_nothing() {
        let backend = RecordingBackend::with_responses(vec![]);
        let payloads = vec![b"{}".to_vec()];

        let summary = run(backend.clone(), &payloads, MalformedRecordPolicy::Skip)
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.attempts, 0);
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch_succeeds_without_backend_call() {
        let backend = RecordingBackend::with_responses(vec![]);

        let summary = run(backend.clone(), &[], MalformedRecordPolicy::FailBatch)
            .await
            .unwrap();

        assert_eq!(summary, IngestSummary::default());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_surfaces_as_backend_call() {
        let backend = RecordingBackend::with_responses(vec![Err(BackendError::Validation(
            "item too large".to_string(),
        ))]);
        let payloads = vec![tweet("Ada", "one")];

        let result = run(backend, &payloads, MalformedRecordPolicy::FailBatch).await;

        assert_eq!(
            result,
            Err(IngestError::BackendCall(BackendError::Validation(
                "item too large".to_string()
            )))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_is_retried_to_success() {
        let backend = RecordingBackend::with_responses(vec![Ok(BatchRequest::for_table(
            TABLE,
            vec![row("Grace", "two")],
        ))]);
        let payloads = vec![tweet("Ada", "one"), tweet("Grace", "two")];

        let summary = run(backend.clone(), &payloads, MalformedRecordPolicy::FailBatch)
            .await
            .unwrap();

        assert_eq!(summary.attempts, 2);
        assert_eq!(
            backend.requests()[1].items(TABLE).unwrap(),
            &[row("Grace", "two")]
        );
    }

    #[test]
    fn test_write_error_conversion() {
        let error: IngestError = WriteError::DeadlineExceeded {
            attempt: 2,
            remaining_ms: 120,
            unprocessed: 4,
        }
        .into();

        assert_eq!(
            error,
            IngestError::DeadlineExceeded {
                attempt: 2,
                remaining_ms: 120,
                unprocessed: 4,
            }
        );
    }

    #[test]
    fn test_malformed_record_display() {
        let error = IngestError::MalformedRecord {
            index: 3,
            source: RecordError::InvalidTimestamp("soon".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "Malformed record at index 3: Invalid source timestamp: soon"
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "fail".parse::<MalformedRecordPolicy>(),
            Ok(MalformedRecordPolicy::FailBatch)
        );
        assert_eq!(
            "SKIP".parse::<MalformedRecordPolicy>(),
            Ok(MalformedRecordPolicy::Skip)
        );
        assert!("ignore".parse::<MalformedRecordPolicy>().is_err());
    }
}
