//! Workflow error types.

use invoker::SubmissionError;
use thiserror::Error;

/// Errors that can occur while running a workflow handler.
///
/// Errors stay local to the handler that raised them. A failure in a step
/// invoked asynchronously never reaches the step that invoked it.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The next step could not be submitted.
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    /// The incoming record could not be decoded, or the outgoing one encoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// No handler is registered under this name.
    #[error("Unknown step: {0}")]
    UnknownStep(String),

    /// The record already carries the status this step would add.
    #[error("Status '{field}' is already recorded")]
    StatusAlreadyRecorded { field: &'static str },
}

impl WorkflowError {
    /// Short name of the failure class, suitable for error reports.
    pub fn error_type(&self) -> &'static str {
        match self {
            WorkflowError::Submission(_) => "SubmissionError",
            WorkflowError::InvalidPayload(_) => "InvalidPayload",
            WorkflowError::UnknownStep(_) => "UnknownStep",
            WorkflowError::StatusAlreadyRecorded { .. } => "StatusAlreadyRecorded",
        }
    }
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, WorkflowError>;
