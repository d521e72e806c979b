//! Deployed function naming convention.

use crate::error::SubmissionError;

/// Service identifier every deployed function name starts with.
pub const SERVICE_NAME: &str = "optifuse-ecommerce-test";

/// Stage used when none is configured.
pub const DEFAULT_STAGE: &str = "dev";

/// Joins service, stage and function name.
pub const SEPARATOR: char = '-';

/// Longest function name the substrate accepts.
pub const MAX_FUNCTION_NAME_LEN: usize = 64;

/// Resolves short function names to `{service}-{stage}-{function}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNaming {
    service: String,
    stage: String,
}

impl FunctionNaming {
    /// Naming for [`SERVICE_NAME`] deployed at the given stage.
    pub fn new(stage: impl Into<String>) -> Self {
        Self::with_service(SERVICE_NAME, stage)
    }

    pub fn with_service(service: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            stage: stage.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Returns the fully-qualified deployed name for `function_name`.
    pub fn qualify(&self, function_name: &str) -> Result<String, SubmissionError> {
        let name = format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.service, self.stage, function_name
        );

        let invalid = |reason| SubmissionError::InvalidFunctionName {
            name: name.clone(),
            reason,
        };

        if function_name.is_empty() {
            return Err(invalid("function name is empty"));
        }
        if self.stage.is_empty() {
            return Err(invalid("stage is empty"));
        }
        if name.len() > MAX_FUNCTION_NAME_LEN {
            return Err(invalid("longer than 64 characters"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("only letters, digits, '-' and '_' are allowed"));
        }

        Ok(name)
    }
}

impl Default for FunctionNaming {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE)
    }
}
