//! CLI route: single route table and run context. Dispatches to the assistant and presentation.

use crate::assistant::Assistant;
use crate::config::{AssistConfig, ConfigLoader};
use crate::error::AssistError;
use crate::executor::CancelToken;
use crate::tool::ToolReply;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_json, format_config_text, format_config_toml, format_operations_json,
    format_operations_text, format_plan_json, format_plan_text,
};

/// What a command printed and whether it counts as success for the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

/// Runtime context for CLI execution: resolved config and the assistant built from it.
pub struct RunContext {
    config: AssistConfig,
    assistant: Assistant,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, AssistError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        let assistant = Assistant::from_config(&config);
        Ok(Self::with_assistant(config, assistant))
    }

    /// Context around an already-built assistant.
    pub fn with_assistant(config: AssistConfig, assistant: Assistant) -> Self {
        Self { config, assistant }
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, AssistError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.as_ref().map(|o| o.success).unwrap_or(false),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, AssistError> {
        match command {
            Commands::Ask { json, query } => {
                let reply = self.assistant.reply(&query.join(" "));
                let text = if *json {
                    serde_json::to_string_pretty(&reply).map_err(|e| {
                        AssistError::Internal(format!("Failed to serialize reply: {}", e))
                    })?
                } else {
                    reply.to_string()
                };
                Ok(CommandOutput {
                    text,
                    success: reply.is_success(),
                })
            }
            Commands::Plan { format, query } => {
                let plan = self.assistant.plan(&query.join(" "))?;
                let text = if format == "json" {
                    format_plan_json(&plan)?
                } else {
                    format_plan_text(&plan)
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Operations { format } => {
                let text = if format == "json" {
                    format_operations_json()?
                } else {
                    format_operations_text()
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Config { format } => {
                let text = match format.as_str() {
                    "json" => format_config_json(&self.config)?,
                    "toml" => format_config_toml(&self.config)?,
                    _ => format_config_text(&self.config),
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Shell => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                let answered = self.run_shell(stdin.lock(), stdout.lock())?;
                debug!(answered, "Shell session ended");
                Ok(CommandOutput::ok(String::new()))
            }
        }
    }

    /// Answer each non-empty line of `input` until `exit`, `quit` or EOF. Returns how many
    /// requests were answered.
    pub fn run_shell<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<usize, AssistError> {
        let mut answered = 0;
        for line in input.lines() {
            let line = line?;
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                break;
            }
            let reply: ToolReply = self.assistant.reply_with_cancel(query, &CancelToken::new());
            writeln!(output, "{}\n", reply)?;
            output.flush()?;
            answered += 1;
        }
        Ok(answered)
    }
}
