//! Kinesis to DynamoDB ingestion Lambda.
//!
//! This crate is the imperative shell around `streamsync_core`: it wires the
//! core's traits to DynamoDB, reads deployment configuration from the
//! environment and adapts Lambda events to the ingest pipeline.

pub mod config;
pub mod handler;
pub mod storage;
