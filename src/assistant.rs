//! Assistant: the core entry point.
//!
//! Wires matching, extraction and execution together. Holds no per-request state, so
//! one instance can serve concurrent callers.

use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::executor::{CancelToken, CommandExecutor, ProcessRunner, SystemRunner};
use crate::intent::{match_intent, ParameterHints};
use crate::invocation::Invocation;
use crate::operation::Operation;
use crate::params::{ParameterExtractor, ParameterSet};
use crate::tool::ToolReply;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything decided about a request before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub operation: Operation,
    pub hints: ParameterHints,
    pub params: ParameterSet,
    pub invocation: Invocation,
}

#[derive(Clone)]
pub struct Assistant {
    extractor: ParameterExtractor,
    executor: CommandExecutor,
}

impl Assistant {
    pub fn new(extractor: ParameterExtractor, executor: CommandExecutor) -> Self {
        Self {
            extractor,
            executor,
        }
    }

    /// Assistant that runs real processes.
    pub fn from_config(config: &AssistConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    pub fn with_runner(config: &AssistConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let executor = CommandExecutor::new(runner, config.cli.resolve_paths(), config.cli.timeout());
        Self::new(
            ParameterExtractor::new(config.cli.default_project.clone()),
            executor,
        )
    }

    /// Match and extract without running anything.
    pub fn plan(&self, input: &str) -> Result<Plan, AssistError> {
        let matched =
            match_intent(input).ok_or_else(|| AssistError::Unrecognized(input.trim().to_string()))?;
        let params = self
            .extractor
            .extract(matched.operation, input, &matched.hints)?;
        let invocation = self.executor.invocation(matched.operation, &params);
        debug!(operation = %matched.operation, invocation = %invocation, "Request planned");
        Ok(Plan {
            operation: matched.operation,
            hints: matched.hints,
            params,
            invocation,
        })
    }

    /// Full pipeline; errors are returned to the caller.
    pub fn run(&self, input: &str, cancel: &CancelToken) -> Result<String, AssistError> {
        let plan = self.plan(input)?;
        info!(operation = %plan.operation, "Executing request");
        self.executor
            .execute_with_cancel(plan.operation, &plan.params, cancel)
    }

    /// Structured reply; never fails.
    pub fn reply(&self, input: &str) -> ToolReply {
        self.reply_with_cancel(input, &CancelToken::new())
    }

    pub fn reply_with_cancel(&self, input: &str, cancel: &CancelToken) -> ToolReply {
        match self.run(input, cancel) {
            Ok(report) => ToolReply::success(report),
            Err(e) => {
                debug!(error = %e, "Request failed");
                ToolReply::from_error(input, &e)
            }
        }
    }

    /// Core boundary: always returns a string, success or not.
    pub fn handle(&self, input: &str) -> String {
        self.reply(input).to_string()
    }
}
