//! Supported Operations
//!
//! The closed set of cloud operations the assistant can perform. Each variant carries a
//! static schema (parameters, default policy, executable family, CLI template) so that
//! operation-specific knowledge lives in one table instead of scattered conditionals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Executable family an operation is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Gcloud,
    Bq,
}

impl Tool {
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Gcloud => "gcloud",
            Tool::Bq => "bq",
        }
    }
}

/// Parameter names understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    ProjectId,
    Dataset,
    BillingAccountId,
    Format,
}

impl ParamKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::ProjectId => "project_id",
            ParamKey::Dataset => "dataset",
            ParamKey::BillingAccountId => "billing_account_id",
            ParamKey::Format => "format",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One supported cloud operation. Declaration order is the final tie-break for
/// natural-language matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListProjects,
    ListInstances,
    ListBuckets,
    DescribeProject,
    ListRegions,
    ListZones,
    ListServices,
    ListBillingAccounts,
    LinkBilling,
    ListDatasets,
    ListTables,
}

/// Static per-operation schema.
#[derive(Debug, Clone, Copy)]
pub struct OperationSchema {
    pub tool: Tool,
    /// Fixed subcommand tokens following the executable.
    pub subcommand: &'static [&'static str],
    pub required: &'static [ParamKey],
    pub optional: &'static [ParamKey],
    /// Whether a missing `project_id` may be filled from the configured default project.
    pub default_project: bool,
    /// Positional slots in CLI-style input, in order.
    pub positional: &'static [ParamKey],
    /// Plural noun used in summaries ("projects", "instances", ...).
    pub noun: &'static str,
    pub example: &'static str,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::ListProjects,
        Operation::ListInstances,
        Operation::ListBuckets,
        Operation::DescribeProject,
        Operation::ListRegions,
        Operation::ListZones,
        Operation::ListServices,
        Operation::ListBillingAccounts,
        Operation::LinkBilling,
        Operation::ListDatasets,
        Operation::ListTables,
    ];

    pub fn schema(&self) -> OperationSchema {
        use ParamKey::*;
        match self {
            Operation::ListProjects => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["projects", "list"],
                required: &[],
                optional: &[],
                default_project: false,
                positional: &[],
                noun: "projects",
                example: "List all GCP projects",
            },
            Operation::ListInstances => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["compute", "instances", "list"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "instances",
                example: "List instances in project my-project",
            },
            Operation::ListBuckets => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["storage", "ls"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "buckets",
                example: "List all buckets",
            },
            Operation::DescribeProject => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["projects", "describe"],
                required: &[ProjectId],
                optional: &[],
                default_project: true,
                positional: &[ProjectId],
                noun: "projects",
                example: "Describe project my-project",
            },
            Operation::ListRegions => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["compute", "regions", "list"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "regions",
                example: "List all GCP regions",
            },
            Operation::ListZones => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["compute", "zones", "list"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "zones",
                example: "List all GCP zones",
            },
            Operation::ListServices => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["services", "list"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "services",
                example: "List services in project my-project",
            },
            Operation::ListBillingAccounts => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["billing", "accounts", "list"],
                required: &[],
                optional: &[],
                default_project: false,
                positional: &[],
                noun: "billing accounts",
                example: "List billing accounts",
            },
            Operation::LinkBilling => OperationSchema {
                tool: Tool::Gcloud,
                subcommand: &["billing", "projects", "link"],
                required: &[ProjectId, BillingAccountId],
                optional: &[],
                default_project: false,
                positional: &[ProjectId],
                noun: "projects",
                example: "Link billing account 0X0X0X-0X0X0X-0X0X0X to project my-project",
            },
            Operation::ListDatasets => OperationSchema {
                tool: Tool::Bq,
                subcommand: &["ls"],
                required: &[],
                optional: &[ProjectId],
                default_project: true,
                positional: &[],
                noun: "datasets",
                example: "Show BigQuery datasets",
            },
            Operation::ListTables => OperationSchema {
                tool: Tool::Bq,
                subcommand: &["ls"],
                required: &[Dataset],
                optional: &[ProjectId],
                default_project: true,
                positional: &[Dataset],
                noun: "tables",
                example: "Show BigQuery tables in dataset my_dataset",
            },
        }
    }

    /// Stable snake_case name used in logs and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListProjects => "list_projects",
            Operation::ListInstances => "list_instances",
            Operation::ListBuckets => "list_buckets",
            Operation::DescribeProject => "describe_project",
            Operation::ListRegions => "list_regions",
            Operation::ListZones => "list_zones",
            Operation::ListServices => "list_services",
            Operation::ListBillingAccounts => "list_billing_accounts",
            Operation::LinkBilling => "link_billing",
            Operation::ListDatasets => "list_datasets",
            Operation::ListTables => "list_tables",
        }
    }

    /// Every parameter this operation may carry besides `format`.
    pub fn accepts(&self, key: ParamKey) -> bool {
        let schema = self.schema();
        key == ParamKey::Format || schema.required.contains(&key) || schema.optional.contains(&key)
    }

    /// CLI-style form with placeholders, e.g. `gcloud projects describe PROJECT_ID`.
    pub fn cli_usage(&self) -> String {
        let schema = self.schema();
        let mut parts = vec![schema.tool.binary_name().to_string()];
        parts.extend(schema.subcommand.iter().map(|s| s.to_string()));
        match self {
            Operation::DescribeProject => parts.push("PROJECT_ID".to_string()),
            Operation::LinkBilling => {
                parts.push("PROJECT_ID".to_string());
                parts.push("--billing-account=ACCOUNT_ID".to_string());
            }
            Operation::ListTables => parts.push("DATASET".to_string()),
            _ => {}
        }
        parts.join(" ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
