//! DynamoDB batch write backend.
//!
//! Implements `BatchWriteBackend` from `streamsync_core::write` on top of
//! `BatchWriteItem`.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use streamsync_core::write::{BackendError, BatchRequest, BatchWriteBackend, UnprocessedSet};

use super::conversions::{batch_to_request_items, request_items_to_batch};
use super::error::map_batch_write_error;

/// Writes batches of rows with a single `BatchWriteItem` call per attempt.
pub struct DynamoDbBatchWriter {
    client: Client,
}

impl DynamoDbBatchWriter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BatchWriteBackend for DynamoDbBatchWriter {
    async fn batch_write(&self, request: &BatchRequest) -> Result<UnprocessedSet, BackendError> {
        let request_items = batch_to_request_items(request)?;

        tracing::debug!(items = request.item_count(), "Submitting BatchWriteItem");

        let output = self
            .client
            .batch_write_item()
            .set_request_items(Some(request_items))
            .send()
            .await
            .map_err(map_batch_write_error)?;

        match output.unprocessed_items {
            Some(unprocessed) => request_items_to_batch(unprocessed),
            None => Ok(BatchRequest::new()),
        }
    }
}
