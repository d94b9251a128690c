//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, workspace config
//! files, then environment variables. Loaded once at start and read-only afterwards.

use crate::error::AssistError;
use crate::invocation::ToolPaths;
use crate::logging::LoggingConfig;
use crate::operation::{ParamKey, Tool};
use crate::params::validate_identifier;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistConfig {
    /// External CLI settings
    #[serde(default)]
    pub cli: CliToolsConfig,

    /// Conversational model settings (consumed by the hosting tool layer)
    #[serde(default)]
    pub model: ModelConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External CLI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliToolsConfig {
    /// Path to `gcloud`; resolved on PATH when unset
    #[serde(default)]
    pub gcloud_path: Option<PathBuf>,

    /// Path to `bq`; resolved on PATH when unset
    #[serde(default)]
    pub bq_path: Option<PathBuf>,

    /// Project used when a request omits one and the operation allows a default
    #[serde(default)]
    pub default_project: Option<String>,

    /// Bound on each external command, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CliToolsConfig {
    fn default() -> Self {
        Self {
            gcloud_path: None,
            bq_path: None,
            default_project: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CliToolsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured path, else the first match on PATH, else the bare executable name.
    pub fn resolve_paths(&self) -> ToolPaths {
        ToolPaths {
            gcloud: resolve_executable(self.gcloud_path.as_ref(), Tool::Gcloud),
            bq: resolve_executable(self.bq_path.as_ref(), Tool::Bq),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if let Some(project) = &self.default_project {
            validate_identifier(ParamKey::ProjectId, project).map_err(|e| e.to_string())?;
        }
        for (name, path) in [("gcloud_path", &self.gcloud_path), ("bq_path", &self.bq_path)] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(format!("{} cannot be empty", name));
            }
        }
        Ok(())
    }
}

fn resolve_executable(configured: Option<&PathBuf>, tool: Tool) -> PathBuf {
    if let Some(path) = configured {
        return path.clone();
    }
    match which::which(tool.binary_name()) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(
                executable = tool.binary_name(),
                error = %e,
                "Executable not found on PATH, using bare name"
            );
            PathBuf::from(tool.binary_name())
        }
    }
}

/// Conversational model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API key for the model provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        Ok(())
    }

    /// Masked description of the API key, safe to print.
    pub fn api_key_status(&self) -> String {
        match self.api_key.as_deref() {
            None | Some("") => "not set".to_string(),
            Some(key) if key.chars().count() <= 8 => "set".to_string(),
            Some(key) => format!("set ({}...)", key.chars().take(4).collect::<String>()),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Cli(String),
    Model(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Cli(msg) => write!(f, "cli: {}", msg),
            ValidationError::Model(msg) => write!(f, "model: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AssistConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.cli.validate() {
            errors.push(ValidationError::Cli(e));
        }
        if let Err(e) = self.model.validate() {
            errors.push(ValidationError::Model(e));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into one error.
    pub fn ensure_valid(&self) -> Result<(), AssistError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AssistError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }
}
