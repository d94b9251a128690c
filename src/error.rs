//! Error types for the gcp-assist command pipeline.

use crate::operation::ParamKey;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while interpreting, dispatching or running a request.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Unrecognized request: '{0}'")]
    Unrecognized(String),

    #[error("Missing required parameter(s): {}", join_keys(.0))]
    MissingParameter(Vec<ParamKey>),

    #[error("Invalid value for {field}: '{value}' (allowed: letters, digits, '-', '_', '.')")]
    InvalidParameter { field: ParamKey, value: String },

    #[error("Command timed out after {}s", .0.as_secs_f64())]
    ExecutionTimeout(Duration),

    #[error("Command failed with exit code {exit_code}: {stderr}")]
    ExternalCommandError { exit_code: i32, stderr: String },

    #[error("Command was cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn join_keys(keys: &[ParamKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<config::ConfigError> for AssistError {
    fn from(err: config::ConfigError) -> Self {
        AssistError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AssistError {
    fn from(err: std::io::Error) -> Self {
        AssistError::Internal(err.to_string())
    }
}
