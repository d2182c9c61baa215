//! Lambda event handler.
//!
//! The [`Ingestor`] owns everything that outlives a single invocation: the
//! settings cache, the configuration source and the write driver. Each
//! Kinesis batch is handed to [`streamsync_core::ingest::ingest`] with a
//! deadline taken from the invocation context.

use std::sync::Arc;

use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_runtime::LambdaEvent;

use streamsync_core::config::{ConfigSource, SettingsCache};
use streamsync_core::ingest::{ingest, IngestError, IngestSummary, MalformedRecordPolicy};
use streamsync_core::write::{BatchWriteDriver, Deadline};

/// Handles inbound Kinesis batches.
pub struct Ingestor {
    settings: SettingsCache,
    config_source: Arc<dyn ConfigSource>,
    driver: BatchWriteDriver,
    policy: MalformedRecordPolicy,
}

impl Ingestor {
    pub fn new(
        config_source: Arc<dyn ConfigSource>,
        driver: BatchWriteDriver,
        policy: MalformedRecordPolicy,
    ) -> Self {
        Self {
            settings: SettingsCache::new(),
            config_source,
            driver,
            policy,
        }
    }

    /// Writes every record of `event` to the event data table.
    ///
    /// Returns an error for the whole batch if any step fails, so the
    /// runtime reports the invocation as failed and Kinesis redelivers it.
    pub async fn handle(
        &self,
        event: LambdaEvent<KinesisEvent>,
    ) -> Result<IngestSummary, IngestError> {
        let LambdaEvent { payload, context, .. } = event;

        tracing::info!(
            request_id = %context.request_id,
            records = payload.records.len(),
            "Received Kinesis batch"
        );

        let settings = self
            .settings
            .get_or_load(self.config_source.as_ref())
            .await?;
        let table_name = settings.table_name()?;

        let deadline = Deadline::from_epoch_millis(context.deadline);
        let payloads = payload
            .records
            .iter()
            .map(|record| record.kinesis.data.0.as_slice());

        let summary = ingest(payloads, table_name, &self.driver, &deadline, self.policy).await;

        match &summary {
            Ok(summary) => tracing::info!(
                items_written = summary.items_written,
                attempts = summary.attempts,
                skipped = summary.skipped,
                table = table_name,
                "Batch written"
            ),
            Err(error) => tracing::error!(error = %error, table = table_name, "Batch failed"),
        }

        summary
    }
}
