mod cache;
mod error;
mod settings;
mod traits;

pub use cache::SettingsCache;
pub use error::ConfigError;
pub use settings::{Settings, EVENT_DATA_TABLE_KEY};
pub use traits::ConfigSource;
