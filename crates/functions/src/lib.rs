//! AWS Lambda bootstrap serving the order workflow handlers.
//!
//! One binary serves every step. The Lambda runtime tells the process which
//! one through `_HANDLER`; the invocation payload is handed to that step's
//! handler and its output returned to the runtime.

pub mod config;
pub mod error;

use std::time::Duration;

use invoker::{InvocationTransport, Invoker, LambdaTransport};
use lambda_runtime::LambdaEvent;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use workflow::{OrderWorkflow, Step};

use config::{Config, LogFormat};
use error::FunctionError;

/// Installs the global tracing subscriber.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        // The runtime stamps every line itself.
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .without_time(),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// How often counters are pushed when a Pushgateway is configured.
pub const METRICS_PUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Installs the global Prometheus metrics recorder.
///
/// With a Pushgateway configured the exporter pushes on
/// [`METRICS_PUSH_INTERVAL`] and no handle is returned. Otherwise the
/// recorder is installed alone and the handle renders the current counters.
/// Must run inside the tokio runtime.
pub fn init_metrics(config: &Config) -> Result<Option<PrometheusHandle>, BuildError> {
    let builder = PrometheusBuilder::new();
    match &config.metrics_push_gateway {
        Some(endpoint) => {
            builder
                .with_push_gateway(endpoint, METRICS_PUSH_INTERVAL, None, None)?
                .install()?;
            Ok(None)
        }
        None => builder.install_recorder().map(Some),
    }
}

/// Builds the workflow backed by a single AWS Lambda client.
pub async fn lambda_workflow(config: &Config) -> OrderWorkflow<LambdaTransport> {
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_lambda::Client::new(&sdk_config);
    OrderWorkflow::new(Invoker::new(config.naming(), LambdaTransport::new(client)))
}

/// Runs one invocation of `step`.
pub async fn handle<T: InvocationTransport>(
    workflow: &OrderWorkflow<T>,
    step: Step,
    event: LambdaEvent<Value>,
) -> Result<Value, FunctionError> {
    let (payload, context) = event.into_parts();
    tracing::info!(request_id = %context.request_id, handler = %step, "invocation received");

    Ok(workflow.dispatch(step, payload).await?)
}
