//! Tool surface for the conversational layer: the tool declaration the model sees
//! and the structured reply it receives.

use crate::error::AssistError;
use crate::suggest::{render_suggestions, suggested_commands, unrecognized_message};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::error;

pub const TOOL_NAME: &str = "gcp_tool";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
}

/// Structured reply for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReply {
    pub status: ReplyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_commands: Option<String>,
}

impl ToolReply {
    pub fn success(report: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Success,
            report: Some(report.into()),
            error_message: None,
            suggested_commands: None,
        }
    }

    pub fn error(message: impl Into<String>, suggestions: Option<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            report: None,
            error_message: Some(message.into()),
            suggested_commands: suggestions,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }

    /// Map a pipeline failure for `input` to a reply the caller can act on.
    pub fn from_error(input: &str, err: &AssistError) -> Self {
        let suggestions = || Some(render_suggestions(&suggested_commands(input)));
        match err {
            AssistError::Unrecognized(_) => Self::error(unrecognized_message(input), suggestions()),
            AssistError::MissingParameter(_) => Self::error(err.to_string(), suggestions()),
            AssistError::InvalidParameter { .. } => Self::error(err.to_string(), None),
            AssistError::ExternalCommandError { exit_code, stderr } => Self::error(
                format!(
                    "Error executing command (exit code {}): {}",
                    exit_code,
                    stderr.trim_end_matches(['\r', '\n'])
                ),
                suggestions(),
            ),
            AssistError::ExecutionTimeout(_) | AssistError::Cancelled => {
                Self::error(err.to_string(), None)
            }
            AssistError::Internal(_) | AssistError::ConfigError(_) => {
                error!(error = %err, "Request failed with internal error");
                Self::error(
                    format!("An internal error prevented running the command. {}", err),
                    None,
                )
            }
        }
    }
}

impl fmt::Display for ToolReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            ReplyStatus::Success => f.write_str(self.report.as_deref().unwrap_or("")),
            ReplyStatus::Error => {
                f.write_str(self.error_message.as_deref().unwrap_or("Unknown error"))?;
                if let Some(suggestions) = &self.suggested_commands {
                    write!(f, "\n\n{}", suggestions)?;
                }
                Ok(())
            }
        }
    }
}

/// Function declaration handed to the model: one string parameter, `query`.
pub fn tool_declaration() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Process Google Cloud queries. Accepts natural language (\"List all GCP projects\") \
                        or a supported gcloud/bq command (\"gcloud projects list\", \"bq ls DATASET\") \
                        and returns the result or an error with suggested commands.",
        "parameters": {
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's Google Cloud request"
                }
            },
            "required": ["query"]
        }
    })
}
