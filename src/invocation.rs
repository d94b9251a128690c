//! Invocation building: (Operation, ParameterSet) to executable plus argument list.

use crate::operation::{Operation, ParamKey, Tool};
use crate::params::{OutputFormat, ParameterSet};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Resolved executable paths for each tool family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolPaths {
    pub gcloud: PathBuf,
    pub bq: PathBuf,
}

impl ToolPaths {
    pub fn path_for(&self, tool: Tool) -> &PathBuf {
        match tool {
            Tool::Gcloud => &self.gcloud,
            Tool::Bq => &self.bq,
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            gcloud: PathBuf::from(Tool::Gcloud.binary_name()),
            bq: PathBuf::from(Tool::Bq.binary_name()),
        }
    }
}

/// A concrete external-process call. Arguments are passed to the process as a list,
/// never through a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the invocation for `operation`. Only values from the validated
    /// parameter set are used.
    pub fn build(operation: Operation, params: &ParameterSet, paths: &ToolPaths) -> Self {
        let schema = operation.schema();
        let mut args: Vec<String> = schema.subcommand.iter().map(|s| s.to_string()).collect();
        let json = params.format() == OutputFormat::Json;
        let project = params.get(ParamKey::ProjectId);

        match schema.tool {
            Tool::Gcloud => {
                // Positional first, then flags.
                for slot in schema.positional {
                    if let Some(value) = params.get(*slot) {
                        args.push(value.to_string());
                    }
                }
                if let Some(account) = params.get(ParamKey::BillingAccountId) {
                    args.push(format!("--billing-account={}", account));
                }
                if json {
                    args.push("--format=json".to_string());
                }
                if !schema.positional.contains(&ParamKey::ProjectId) {
                    if let Some(project) = project {
                        args.push(format!("--project={}", project));
                    }
                }
            }
            Tool::Bq => {
                // bq expects flags before the positional dataset.
                if json {
                    args.push("--format=json".to_string());
                }
                if let Some(project) = project {
                    args.push(format!("--project_id={}", project));
                }
                for slot in schema.positional {
                    if let Some(value) = params.get(*slot) {
                        args.push(value.to_string());
                    }
                }
            }
        }

        Self::new(paths.path_for(schema.tool).clone(), args)
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}
