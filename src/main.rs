use std::sync::Arc;

use bifrost::config::{NormalizerConfig, entry_point_from_env};
use bifrost::handler::{echo_handler, service};
use bifrost::normalizer::EventNormalizer;
use lambda_runtime::tracing::info;
use lambda_runtime::{Error, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = NormalizerConfig::from_env()?;
    let entry = entry_point_from_env()?;
    info!(%entry, policy = ?config.record_policy, "Starting event normalizer");

    let normalizer = Arc::new(EventNormalizer::new(&config));
    lambda_runtime::run(service_fn(service(normalizer, entry, echo_handler))).await
}
