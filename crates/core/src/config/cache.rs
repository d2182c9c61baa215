use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{ConfigError, ConfigSource, Settings};

/// Process-wide settings, populated on the first successful load.
///
/// The cell is assigned at most once. A failed load leaves it empty, so the
/// next invocation tries the source again.
#[derive(Debug, Default)]
pub struct SettingsCache {
    cell: OnceCell<Arc<Settings>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings if they have already been loaded.
    pub fn get(&self) -> Option<Arc<Settings>> {
        self.cell.get().cloned()
    }

    /// Returns the cached settings, loading them from `source` on a cold start.
    pub async fn get_or_load(
        &self,
        source: &dyn ConfigSource,
    ) -> Result<Arc<Settings>, ConfigError> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!("Configuration not cached, loading");
                let settings = source.load().await?;
                tracing::info!(keys = settings.len(), "Configuration loaded");
                Ok(Arc::new(settings))
            })
            .await
            .cloned()
    }
}
