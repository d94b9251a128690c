//! Command Execution
//!
//! Runs a built [`Invocation`] through a [`ProcessRunner`] and turns the outcome into
//! a reply string. The runner is the seam between the pipeline and real processes;
//! tests substitute a scripted runner.

mod cancel;
mod process;

pub use cancel::CancelToken;
pub use process::SystemRunner;

use crate::error::AssistError;
use crate::format::render;
use crate::invocation::{Invocation, ToolPaths};
use crate::operation::Operation;
use crate::params::ParameterSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Default bound on a single external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS);

/// Captured outcome of one process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Spawns and awaits exactly one process per call.
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion, or until `timeout` elapses or `cancel` fires.
    /// Implementations must not leave the process running on any error path.
    fn run(
        &self,
        invocation: &Invocation,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> Result<ExecutionResult, AssistError>;
}

/// Builds, runs and formats commands for matched operations.
#[derive(Clone)]
pub struct CommandExecutor {
    runner: Arc<dyn ProcessRunner>,
    paths: ToolPaths,
    timeout: Duration,
}

impl CommandExecutor {
    pub fn new(runner: Arc<dyn ProcessRunner>, paths: ToolPaths, timeout: Duration) -> Self {
        Self {
            runner,
            paths,
            timeout,
        }
    }

    pub fn paths(&self) -> &ToolPaths {
        &self.paths
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn invocation(&self, operation: Operation, params: &ParameterSet) -> Invocation {
        Invocation::build(operation, params, &self.paths)
    }

    pub fn execute(&self, operation: Operation, params: &ParameterSet) -> Result<String, AssistError> {
        self.execute_with_cancel(operation, params, &CancelToken::new())
    }

    pub fn execute_with_cancel(
        &self,
        operation: Operation,
        params: &ParameterSet,
        cancel: &CancelToken,
    ) -> Result<String, AssistError> {
        let invocation = self.invocation(operation, params);
        let result = self.runner.run(&invocation, self.timeout, cancel)?;
        if !result.success() {
            error!(
                operation = %operation,
                exit_code = result.exit_code,
                stderr = %result.stderr.trim(),
                "External command failed"
            );
            return Err(AssistError::ExternalCommandError {
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(render(operation, params, &result))
    }
}
