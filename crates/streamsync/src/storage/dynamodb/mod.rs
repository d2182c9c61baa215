//! DynamoDB storage backend implementation.
//!
//! This module provides DynamoDB-based implementations of the core traits
//! using `aws-sdk-dynamodb`: the batch write backend for event rows and the
//! configuration source for per-environment settings.

mod backend;
mod client;
mod config_source;
mod conversions;
mod error;

pub use backend::DynamoDbBatchWriter;
pub use client::create_client;
pub use config_source::{DynamoDbConfigSource, ENVIRONMENT_KEY};
