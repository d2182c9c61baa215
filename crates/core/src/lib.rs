//! Functional core for streamsync.
//!
//! Pure record transformation, the batched write retry driver and the
//! configuration cache. Everything that talks to AWS lives in the
//! `streamsync` crate behind the traits defined here.

pub mod config;
pub mod ingest;
pub mod record;
pub mod write;
