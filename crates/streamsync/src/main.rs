use std::sync::Arc;

use anyhow::Result;
use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamsync::config::Config;
use streamsync::handler::Ingestor;
use streamsync::storage::dynamodb::{create_client, DynamoDbBatchWriter, DynamoDbConfigSource};
use streamsync_core::write::BatchWriteDriver;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamsync=info,streamsync_core=info".into()),
        )
        // CloudWatch adds the ingestion time
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .without_time(),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        target_env = %config.target_display(),
        config_table = %config.config_table_name,
        environment = %config.config_environment,
        policy = ?config.malformed_record_policy,
        "Starting streamsync"
    );

    let client = create_client(&config).await;
    let config_source = DynamoDbConfigSource::new(
        client.clone(),
        config.config_table_name.clone(),
        config.config_environment.clone(),
    );
    let driver = BatchWriteDriver::new(
        Arc::new(DynamoDbBatchWriter::new(client)),
        config.backoff_policy(),
    );
    let ingestor = Arc::new(Ingestor::new(
        Arc::new(config_source),
        driver,
        config.malformed_record_policy,
    ));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<KinesisEvent>| {
        let ingestor = Arc::clone(&ingestor);
        async move {
            ingestor
                .handle(event)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
