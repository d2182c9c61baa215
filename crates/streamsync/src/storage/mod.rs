//! Storage backend implementations.
//!
//! This module provides concrete implementations of the traits defined in
//! `streamsync_core::write` and `streamsync_core::config`.
//!
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory`: HashMap backend used by tests and local runs

pub mod dynamodb;
pub mod inmemory;
