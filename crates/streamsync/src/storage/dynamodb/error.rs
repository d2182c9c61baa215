//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to the error types from `streamsync_core`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use streamsync_core::config::ConfigError;
use streamsync_core::write::BackendError;

/// Map a BatchWriteItem SDK error to BackendError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(e) => BackendError::TableNotFound(
            e.message().unwrap_or("Requested table does not exist").to_string(),
        ),
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            BackendError::Throttled("Throughput exceeded, please retry".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            BackendError::Throttled("Request limit exceeded, please retry".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            BackendError::Validation("Item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            BackendError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err if err.code() == Some("ValidationException") => {
            BackendError::Validation(err.message().unwrap_or("Invalid request").to_string())
        }
        err => BackendError::RequestFailed(format!("BatchWriteItem failed: {:?}", err)),
    }
}

/// Map a GetItem SDK error on the configuration table to ConfigError.
pub fn map_get_config_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> ConfigError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            ConfigError::Unavailable(format!("Configuration table not found: {}", table_name))
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            ConfigError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            ConfigError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            ConfigError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => ConfigError::Unavailable(format!("GetItem failed: {:?}", err)),
    }
}
