use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use review_core::config::HandlerConfig;
use review_core::contract::HandlerSummary;
use review_lambda::adapters::comprehend::ComprehendAnalyzer;
use review_lambda::adapters::kinesis::KinesisPublisher;
use review_lambda::handlers::analysis::handle_review_batch;
use review_lambda::logging::init_json_logging;
use serde_json::Value;

struct RuntimeDependencies {
    config: HandlerConfig,
    analyzer: ComprehendAnalyzer,
    publisher: KinesisPublisher,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<HandlerSummary, Error> {
    let processed_at = Utc::now().to_rfc3339();
    handle_review_batch(
        event.payload,
        &deps.config,
        &processed_at,
        &deps.analyzer,
        &deps.publisher,
    )
    .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_json_logging();

    let config = HandlerConfig::from_env()
        .map_err(|error| Error::from(format!("invalid handler configuration: {error}")))?;
    tracing::info!(
        component = "analysis_lambda",
        event = "cold_start",
        stream = %config.stream_name,
        stream_batch_size = config.stream_batch_size,
        max_batch_size = config.max_batch_size
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        analyzer: ComprehendAnalyzer::new(aws_sdk_comprehend::Client::new(&aws_config)),
        publisher: KinesisPublisher::new(
            aws_sdk_kinesis::Client::new(&aws_config),
            config.stream_name.clone(),
        ),
        config,
    };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
