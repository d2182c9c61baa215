//! In-memory event table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use streamsync_core::record::WriteItem;
use streamsync_core::write::{BackendError, BatchRequest, BatchWriteBackend, UnprocessedSet};

/// Rows keyed by `(Username, Timestamp)`, per table.
type Rows = HashMap<String, HashMap<(String, String), WriteItem>>;

/// In-memory stand-in for the event table.
///
/// Puts overwrite rows with the same key, as `PutRequest` does. Clones share
/// the same rows and call counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    rows: Arc<RwLock<Rows>>,
    calls: Arc<AtomicU32>,
    rejected_calls: u32,
    capacity: Option<usize>,
    failure: Option<BackendError>,
}

impl InMemoryTable {
    /// Creates an empty table that accepts every item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves every item unprocessed for the first `calls` calls.
    pub fn rejecting_first(mut self, calls: u32) -> Self {
        self.rejected_calls = calls;
        self
    }

    /// Writes at most `items` items per call and returns the rest.
    pub fn with_capacity(mut self, items: usize) -> Self {
        self.capacity = Some(items);
        self
    }

    /// Fails every call with `error`.
    pub fn failing_with(mut self, error: BackendError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of batch write calls received so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Stored rows of `table_name`, ordered by key.
    pub async fn rows(&self, table_name: &str) -> Vec<WriteItem> {
        let rows = self.rows.read().await;
        let mut items: Vec<WriteItem> = rows
            .get(table_name)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default();
        items.sort_by(|a, b| (&a.username, &a.timestamp).cmp(&(&b.username, &b.timestamp)));
        items
    }
}

#[async_trait]
impl BatchWriteBackend for InMemoryTable {
    async fn batch_write(&self, request: &BatchRequest) -> Result<UnprocessedSet, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        if call < self.rejected_calls {
            return Ok(request.clone());
        }

        let mut budget = self.capacity.unwrap_or(usize::MAX);
        let mut unprocessed = BatchRequest::new();
        let mut rows = self.rows.write().await;

        for (table_name, items) in request.tables() {
            let table = rows.entry(table_name.to_string()).or_default();
            for item in items {
                if budget == 0 {
                    unprocessed.push(table_name, item.clone());
                    continue;
                }
                budget -= 1;
                table.insert(
                    (item.username.clone(), item.timestamp.clone()),
                    item.clone(),
                );
            }
        }

        Ok(unprocessed)
    }
}
