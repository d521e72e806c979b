//! Handler error types with Lambda diagnostic mapping.

use invoker::SubmissionError;
use lambda_runtime::Diagnostic;
use workflow::WorkflowError;

/// Function-level error reported back to the Lambda runtime.
#[derive(Debug)]
pub struct FunctionError(WorkflowError);

impl From<WorkflowError> for FunctionError {
    fn from(err: WorkflowError) -> Self {
        FunctionError(err)
    }
}

impl From<FunctionError> for Diagnostic {
    fn from(err: FunctionError) -> Self {
        let err = err.0;
        match &err {
            WorkflowError::Submission(SubmissionError::Rejected { function_name, .. }) => {
                tracing::error!(error = %err, %function_name, "next step not submitted");
            }
            _ => tracing::error!(error = %err, "handler failed"),
        }

        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}
