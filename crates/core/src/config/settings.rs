use std::collections::HashMap;

use super::ConfigError;

/// Settings key holding the destination table name.
pub const EVENT_DATA_TABLE_KEY: &str = "EventDataTable";

/// Immutable string settings loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Looks up a key that must be present.
    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingKey(key))
    }

    /// Name of the table rows are written to.
    pub fn table_name(&self) -> Result<&str, ConfigError> {
        self.require(EVENT_DATA_TABLE_KEY)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_lookup() {
        let settings: Settings = [("EventDataTable", "tweets"), ("Environment", "demo")]
            .into_iter()
            .collect();

        assert_eq!(settings.table_name(), Ok("tweets"));
        assert_eq!(settings.get("Environment"), Some("demo"));
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn test_missing_table_name() {
        let settings: Settings = [("Environment", "demo")].into_iter().collect();

        assert_eq!(
            settings.table_name(),
            Err(ConfigError::MissingKey(EVENT_DATA_TABLE_KEY))
        );
    }

    #[test]
    fn test_default_is_empty() {
        let settings = Settings::default();

        assert!(settings.is_empty());
        assert!(settings.get("anything").is_none());
    }
}
