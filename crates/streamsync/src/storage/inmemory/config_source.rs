//! Fixed configuration source.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use streamsync_core::config::{ConfigError, ConfigSource, Settings, EVENT_DATA_TABLE_KEY};

/// Serves the same settings, or the same error, on every load.
#[derive(Debug, Clone)]
pub struct InMemoryConfigSource {
    outcome: Result<Settings, ConfigError>,
    loads: Arc<AtomicU32>,
}

impl InMemoryConfigSource {
    pub fn new(settings: Settings) -> Self {
        Self {
            outcome: Ok(settings),
            loads: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Settings that only name the event data table.
    pub fn with_table(table_name: impl Into<String>) -> Self {
        Self::new([(EVENT_DATA_TABLE_KEY, table_name.into())].into_iter().collect())
    }

    pub fn failing(error: ConfigError) -> Self {
        Self {
            outcome: Err(error),
            loads: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of times `load` has been called.
    pub fn loads(&self) -> u32 {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigSource for InMemoryConfigSource {
    async fn load(&self) -> Result<Settings, ConfigError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
