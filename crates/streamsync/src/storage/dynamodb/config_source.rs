//! Settings stored as one DynamoDB item per environment.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use streamsync_core::config::{ConfigError, ConfigSource, Settings};

use super::conversions::item_to_settings;
use super::error::map_get_config_error;

/// Partition key of the configuration table.
pub const ENVIRONMENT_KEY: &str = "Environment";

/// Reads settings from the configuration table, keyed by environment name.
pub struct DynamoDbConfigSource {
    client: Client,
    table_name: String,
    environment: String,
}

impl DynamoDbConfigSource {
    pub fn new(
        client: Client,
        table_name: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            environment: environment.into(),
        }
    }
}

#[async_trait]
impl ConfigSource for DynamoDbConfigSource {
    async fn load(&self) -> Result<Settings, ConfigError> {
        tracing::debug!(
            table = %self.table_name,
            environment = %self.environment,
            "Fetching configuration"
        );

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ENVIRONMENT_KEY, AttributeValue::S(self.environment.clone()))
            .send()
            .await
            .map_err(|e| map_get_config_error(e, &self.table_name))?;

        match result.item {
            Some(item) => Ok(item_to_settings(&item)),
            None => Err(ConfigError::NotFound {
                source_name: self.table_name.clone(),
                environment: self.environment.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::operation::get_item::{GetItemError, GetItemOutput};
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client};

    use super::*;

    fn source(client: Client) -> DynamoDbConfigSource {
        DynamoDbConfigSource::new(client, "StreamProcessingRefArchConfig", "demo")
    }

    #[tokio::test]
    async fn test_loads_settings_for_environment() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .match_requests(|input| {
                input.table_name() == Some("StreamProcessingRefArchConfig")
                    && input
                        .key()
                        .and_then(|key| key.get(ENVIRONMENT_KEY))
                        .and_then(|value| value.as_s().ok())
                        .is_some_and(|env| env == "demo")
            })
            .then_output(|| {
                GetItemOutput::builder()
                    .item(ENVIRONMENT_KEY, AttributeValue::S("demo".to_string()))
                    .item("EventDataTable", AttributeValue::S("tweets".to_string()))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);

        let settings = source(client).load().await.unwrap();

        assert_eq!(settings.table_name(), Ok("tweets"));
        assert_eq!(settings.get(ENVIRONMENT_KEY), Some("demo"));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_item_is_not_found() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .then_output(|| GetItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);

        let result = source(client).load().await;

        assert_eq!(
            result,
            Err(ConfigError::NotFound {
                source_name: "StreamProcessingRefArchConfig".to_string(),
                environment: "demo".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_unavailable() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item).then_error(|| {
            GetItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build())
        });
        let client = mock_client!(aws_sdk_dynamodb, [&rule]);

        let result = source(client).load().await;

        assert_eq!(
            result,
            Err(ConfigError::Unavailable(
                "Configuration table not found: StreamProcessingRefArchConfig".to_string()
            ))
        );
    }
}
