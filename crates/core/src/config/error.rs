use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration source unavailable: {0}")]
    Unavailable(String),
    #[error("No configuration found for {environment} in {source_name}")]
    NotFound {
        source_name: String,
        environment: String,
    },
    #[error("Configuration is missing required key: {0}")]
    MissingKey(&'static str),
}
