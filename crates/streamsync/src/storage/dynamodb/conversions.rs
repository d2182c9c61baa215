//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use streamsync_core::config::Settings;
use streamsync_core::record::WriteItem;
use streamsync_core::write::{BackendError, BatchRequest, UnprocessedSet};

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_USERNAME: &str = "Username";
pub const ATTR_TIMESTAMP: &str = "Timestamp";
pub const ATTR_MESSAGE: &str = "Message";

// ============================================================================
// WriteItem conversions
// ============================================================================

/// Convert a WriteItem to DynamoDB item.
pub fn write_item_to_item(item: &WriteItem) -> HashMap<String, AttributeValue> {
    let mut attributes = HashMap::new();

    attributes.insert(
        ATTR_USERNAME.to_string(),
        AttributeValue::S(item.username.clone()),
    );
    attributes.insert(
        ATTR_TIMESTAMP.to_string(),
        AttributeValue::S(item.timestamp.clone()),
    );
    attributes.insert(
        ATTR_MESSAGE.to_string(),
        AttributeValue::S(item.message.clone()),
    );

    attributes
}

/// Convert a DynamoDB item to WriteItem.
pub fn item_to_write_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<WriteItem, BackendError> {
    Ok(WriteItem {
        username: get_string(item, ATTR_USERNAME)?,
        timestamp: get_string(item, ATTR_TIMESTAMP)?,
        message: get_string(item, ATTR_MESSAGE)?,
    })
}

// ============================================================================
// Batch conversions
// ============================================================================

/// Convert a BatchRequest into `BatchWriteItem` request items, one
/// `PutRequest` per row.
pub fn batch_to_request_items(
    request: &BatchRequest,
) -> Result<HashMap<String, Vec<WriteRequest>>, BackendError> {
    request
        .tables()
        .map(|(table_name, items)| -> Result<(String, Vec<WriteRequest>), BackendError> {
            let write_requests = items
                .iter()
                .map(put_write_request)
                .collect::<Result<Vec<_>, BackendError>>()?;
            Ok((table_name.to_string(), write_requests))
        })
        .collect()
}

/// Convert `UnprocessedItems` from a `BatchWriteItem` response back into rows.
///
/// Only put requests are ever submitted, so anything else is an invalid
/// response.
pub fn request_items_to_batch(
    request_items: HashMap<String, Vec<WriteRequest>>,
) -> Result<UnprocessedSet, BackendError> {
    request_items
        .into_iter()
        .map(|(table_name, write_requests)| -> Result<(String, Vec<WriteItem>), BackendError> {
            let items = write_requests
                .iter()
                .map(|write_request| {
                    let put = write_request.put_request().ok_or_else(|| {
                        BackendError::InvalidResponse(format!(
                            "Unprocessed request for {} is not a put",
                            table_name
                        ))
                    })?;
                    item_to_write_item(put.item())
                })
                .collect::<Result<Vec<_>, BackendError>>()?;
            Ok((table_name, items))
        })
        .collect()
}

fn put_write_request(item: &WriteItem) -> Result<WriteRequest, BackendError> {
    let put = PutRequest::builder()
        .set_item(Some(write_item_to_item(item)))
        .build()
        .map_err(|e| BackendError::Validation(e.to_string()))?;

    Ok(WriteRequest::builder().put_request(put).build())
}

// ============================================================================
// Settings conversions
// ============================================================================

/// Convert a configuration item to Settings.
///
/// String and number attributes become settings; other attribute types are
/// not representable as plain strings and are skipped.
pub fn item_to_settings(item: &HashMap<String, AttributeValue>) -> Settings {
    item.iter()
        .filter_map(|(key, value)| match value {
            AttributeValue::S(s) | AttributeValue::N(s) => Some((key.clone(), s.clone())),
            _ => {
                tracing::debug!(key = %key, "Ignoring non-scalar configuration attribute");
                None
            }
        })
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, BackendError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            BackendError::InvalidResponse(format!("Missing or invalid field: {}", key))
        })
}
