//! Transports that deliver invocation requests to the substrate.

pub mod in_memory;
pub mod lambda;

use async_trait::async_trait;

use crate::error::SubmissionError;

pub use in_memory::InMemoryTransport;
pub use lambda::LambdaTransport;

/// A single fire-and-forget invocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Fully-qualified deployed function name.
    pub function_name: String,
    /// JSON-encoded payload.
    pub payload: Vec<u8>,
}

impl InvocationRequest {
    /// Decodes the payload back into JSON.
    pub fn payload_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.payload)
    }
}

/// One-way submission capability.
///
/// Implementations return once the substrate has accepted or refused the
/// request. They never wait for the invoked function to run.
#[async_trait]
pub trait InvocationTransport: Send + Sync {
    async fn submit(&self, request: InvocationRequest) -> Result<(), SubmissionError>;
}
