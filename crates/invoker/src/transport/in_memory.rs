//! In-memory transport that records submissions.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{InvocationRequest, InvocationTransport};
use crate::error::SubmissionError;

#[derive(Debug, Default)]
struct InMemoryTransportState {
    requests: Vec<InvocationRequest>,
    rejected: HashSet<String>,
}

/// Records every accepted request without running anything.
///
/// Clones share the same record, so a test can hand one clone to the code
/// under test and inspect another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransport {
    state: Arc<RwLock<InMemoryTransportState>>,
}

impl InMemoryTransport {
    /// Creates a new in-memory transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether submissions to the given deployed name are refused.
    pub fn set_reject(&self, function_name: impl Into<String>, reject: bool) {
        let function_name = function_name.into();
        let mut state = self.state.write().unwrap();
        if reject {
            state.rejected.insert(function_name);
        } else {
            state.rejected.remove(&function_name);
        }
    }

    /// Returns all accepted requests in submission order.
    pub fn requests(&self) -> Vec<InvocationRequest> {
        self.state.read().unwrap().requests.clone()
    }

    /// Returns the accepted requests for one deployed name.
    pub fn requests_for(&self, function_name: &str) -> Vec<InvocationRequest> {
        self.state
            .read()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.function_name == function_name)
            .cloned()
            .collect()
    }

    /// Returns the number of accepted requests.
    pub fn request_count(&self) -> usize {
        self.state.read().unwrap().requests.len()
    }

    /// Removes all recorded requests, keeping rejection settings.
    pub fn clear(&self) {
        self.state.write().unwrap().requests.clear();
    }
}

#[async_trait]
impl InvocationTransport for InMemoryTransport {
    async fn submit(&self, request: InvocationRequest) -> Result<(), SubmissionError> {
        let mut state = self.state.write().unwrap();

        if state.rejected.contains(&request.function_name) {
            return Err(SubmissionError::Rejected {
                function_name: request.function_name,
                reason: "Function unavailable".to_string(),
            });
        }

        state.requests.push(request);
        Ok(())
    }
}
