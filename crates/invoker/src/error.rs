//! Invocation error types.

use thiserror::Error;

/// Errors raised while submitting an invocation.
///
/// All of these are synchronous: they surface before the target function
/// runs. Failures inside the invoked function are never reported here.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The deployed function name violates the substrate's naming rules.
    #[error("Invalid function name '{name}': {reason}")]
    InvalidFunctionName { name: String, reason: &'static str },

    /// The payload could not be encoded.
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The substrate refused the request.
    #[error("Invocation of '{function_name}' rejected: {reason}")]
    Rejected {
        function_name: String,
        reason: String,
    },
}

/// Convenience type alias for invocation results.
pub type Result<T> = std::result::Result<T, SubmissionError>;
