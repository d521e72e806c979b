//! Function configuration loaded from environment variables.

use invoker::{DEFAULT_STAGE, FunctionNaming};
use workflow::{Step, WorkflowError};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, for local runs.
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

/// Function configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STAGE`: deployment stage used in function names (default: `"dev"`)
/// - `_HANDLER`: handler this process serves, set by the Lambda runtime
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `json` or `pretty` (default: `json`)
/// - `METRICS_PUSH_GATEWAY`: Prometheus Pushgateway URL; unset keeps metrics
///   in-process
#[derive(Debug, Clone)]
pub struct Config {
    pub stage: String,
    pub handler: Option<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub metrics_push_gateway: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            stage: non_empty("STAGE").unwrap_or_else(|| DEFAULT_STAGE.to_string()),
            handler: non_empty("_HANDLER"),
            log_level: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format: non_empty("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            metrics_push_gateway: non_empty("METRICS_PUSH_GATEWAY"),
        }
    }

    /// Naming convention for the configured stage.
    pub fn naming(&self) -> FunctionNaming {
        FunctionNaming::new(self.stage.clone())
    }

    /// Resolves the configured handler to a workflow step.
    ///
    /// Accepts the bare function name or a dotted form such as
    /// `bootstrap.processPayment`.
    pub fn step(&self) -> Result<Step, WorkflowError> {
        let handler = self.handler.as_deref().unwrap_or_default();
        let name = handler.rsplit('.').next().unwrap_or(handler);
        name.parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage: DEFAULT_STAGE.to_string(),
            handler: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            metrics_push_gateway: None,
        }
    }
}
