//! Invocation of the next workflow step.

use serde::Serialize;

use crate::error::SubmissionError;
use crate::naming::FunctionNaming;
use crate::transport::{InvocationRequest, InvocationTransport};

/// Resolves, encodes and submits fire-and-forget invocations.
///
/// Holds the process-wide transport; construct one at startup and share it.
#[derive(Debug, Clone)]
pub struct Invoker<T: InvocationTransport> {
    naming: FunctionNaming,
    transport: T,
}

impl<T: InvocationTransport> Invoker<T> {
    pub fn new(naming: FunctionNaming, transport: T) -> Self {
        Self { naming, transport }
    }

    /// Submits `payload` to the deployed function behind `function_name`.
    ///
    /// Returns once the substrate has accepted the request. The outcome of
    /// the invoked function is never observed.
    #[tracing::instrument(skip_all, fields(function = %function_name))]
    pub async fn invoke<P>(&self, function_name: &str, payload: &P) -> Result<(), SubmissionError>
    where
        P: Serialize + Sync + ?Sized,
    {
        metrics::counter!("function_invocations_total", "function" => function_name.to_string())
            .increment(1);

        let result = self.submit(function_name, payload).await;
        if let Err(e) = &result {
            metrics::counter!(
                "function_invocation_failures_total",
                "function" => function_name.to_string()
            )
            .increment(1);
            tracing::warn!(error = %e, "invocation not submitted");
        }
        result
    }

    async fn submit<P>(&self, function_name: &str, payload: &P) -> Result<(), SubmissionError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let qualified = self.naming.qualify(function_name)?;
        let payload = serde_json::to_vec(payload)?;

        tracing::info!(target_function = %qualified, "invoking");
        self.transport
            .submit(InvocationRequest {
                function_name: qualified,
                payload,
            })
            .await
    }
}
