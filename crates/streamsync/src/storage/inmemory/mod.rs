//! In-memory storage backend for testing.
//!
//! This module provides in-memory implementations of the core traits that
//! keep all rows in HashMaps wrapped in `Arc<RwLock<_>>`. The table can be
//! told to leave part of each batch unprocessed, which is how the retry path
//! is exercised without DynamoDB.
//!
//! # Example
//!
//! ```rust,ignore
//! use streamsync::storage::inmemory::InMemoryTable;
//!
//! let table = InMemoryTable::new().rejecting_first(2);
//! // Hand `Arc::new(table.clone())` to a BatchWriteDriver...
//! ```

mod config_source;
mod table;

pub use config_source::InMemoryConfigSource;
pub use table::InMemoryTable;
