use async_trait::async_trait;

use super::{ConfigError, Settings};

/// Where settings are fetched from on a cold start.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetches the full settings map. Must be idempotent.
    async fn load(&self) -> Result<Settings, ConfigError>;
}
