use std::{env, time::Duration};

use streamsync_core::ingest::MalformedRecordPolicy;
use streamsync_core::write::BackoffPolicy;

/// Function configuration loaded from environment variables.
///
/// This is the static deployment configuration. The destination table name
/// lives in the configuration table and is resolved at invocation time.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding per-environment settings
    /// (default: "StreamProcessingRefArchConfig")
    pub config_table_name: String,
    /// Value of the `Environment` key to read settings for (default: "demo")
    pub config_environment: String,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: unset)
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// First retry delay in milliseconds (default: 100)
    pub backoff_base_ms: u64,
    /// Execution time never spent waiting, in milliseconds (default: 200)
    pub backoff_safety_margin_ms: u64,
    /// Handling of undecodable records (default: fail the batch)
    pub malformed_record_policy: MalformedRecordPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CONFIG_TABLE_NAME` - Settings table (default: "StreamProcessingRefArchConfig")
    /// - `CONFIG_ENVIRONMENT` - Settings environment key (default: "demo")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `BACKOFF_BASE_MS` - First retry delay (default: 100)
    /// - `BACKOFF_SAFETY_MARGIN_MS` - Reserved execution time (default: 200)
    /// - `MALFORMED_RECORD_POLICY` - `fail` or `skip` (default: "fail")
    pub fn from_env() -> Self {
        Self {
            config_table_name: env::var("CONFIG_TABLE_NAME")
                .unwrap_or_else(|_| "StreamProcessingRefArchConfig".to_string()),
            config_environment: env::var("CONFIG_ENVIRONMENT")
                .unwrap_or_else(|_| "demo".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            backoff_base_ms: env::var("BACKOFF_BASE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            backoff_safety_margin_ms: env::var("BACKOFF_SAFETY_MARGIN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            malformed_record_policy: parse_malformed_record_policy(
                env::var("MALFORMED_RECORD_POLICY").ok(),
            ),
        }
    }

    /// Backoff policy for the batch write driver.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(
            Duration::from_millis(self.backoff_base_ms),
            Duration::from_millis(self.backoff_safety_margin_ms),
        )
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Parses `MALFORMED_RECORD_POLICY`, falling back to the default policy on an
/// unset or unrecognised value.
fn parse_malformed_record_policy(raw: Option<String>) -> MalformedRecordPolicy {
    let Some(raw) = raw else {
        return MalformedRecordPolicy::default();
    };

    raw.parse().unwrap_or_else(|err| {
        let fallback = MalformedRecordPolicy::default();
        tracing::warn!(
            value = %raw,
            error = %err,
            fallback = ?fallback,
            "Invalid MALFORMED_RECORD_POLICY, using default"
        );
        fallback
    })
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
