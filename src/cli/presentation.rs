//! CLI presentation: text and json formatters per command.

mod config;
mod operations;
mod plan;

pub use config::{format_config_json, format_config_text, format_config_toml};
pub use operations::{format_operations_json, format_operations_text};
pub use plan::{format_plan_json, format_plan_text};

use crate::error::AssistError;

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AssistError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AssistError::Internal(format!("Failed to serialize output: {}", e)))
}
