//! Lambda bootstrap entry point.

use std::sync::Arc;

use functions::config::Config;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    functions::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = functions::init_metrics(&config)?;

    // 3. Resolve which step this process serves
    let step = config.step()?;

    // 4. Build the workflow around one shared Lambda client
    let workflow = Arc::new(functions::lambda_workflow(&config).await);
    tracing::info!(%step, stage = %config.stage, "starting handler");

    // 5. Serve invocations until the runtime shuts us down
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let workflow = workflow.clone();
        let metrics_handle = metrics_handle.clone();
        async move {
            let output = functions::handle(&workflow, step, event).await;
            if let Some(handle) = &metrics_handle {
                tracing::debug!(metrics = %handle.render(), "metrics snapshot");
            }
            output
        }
    }))
    .await
}
