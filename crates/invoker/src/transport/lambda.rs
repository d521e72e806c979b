//! AWS Lambda transport.

use async_trait::async_trait;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;

use super::{InvocationRequest, InvocationTransport};
use crate::error::SubmissionError;

/// Submits requests with the `Event` invocation type.
///
/// Wraps one SDK client, which is cheap to clone and reuses its connection
/// pool across concurrent submissions.
#[derive(Debug, Clone)]
pub struct LambdaTransport {
    client: Client,
}

impl LambdaTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InvocationTransport for LambdaTransport {
    async fn submit(&self, request: InvocationRequest) -> Result<(), SubmissionError> {
        let InvocationRequest {
            function_name,
            payload,
        } = request;

        let output = self
            .client
            .invoke()
            .function_name(&function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| SubmissionError::Rejected {
                function_name: function_name.clone(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        // Accepted event invocations answer 202.
        let status = output.status_code();
        if !(200..300).contains(&status) {
            return Err(SubmissionError::Rejected {
                function_name,
                reason: format!("unexpected status code {status}"),
            });
        }

        Ok(())
    }
}
