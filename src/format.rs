//! Result formatting.
//!
//! JSON requested and JSON returned: stdout is passed through byte for byte.
//! Otherwise each operation gets a short deterministic summary:
//!
//! - list operations: `Found K <noun>: a, b, c` naming at most [`MAX_LISTED`] items,
//!   then `, ... and M more`; `No <noun> found.` for an empty listing. Table output
//!   skips header and separator rows and names each row by its first column. A JSON
//!   array is summarized by a per-operation name field.
//! - describe project: `Project P (name: N, number: X, state: S)`.
//! - link billing: `Linked billing account B to project P.`

use crate::executor::ExecutionResult;
use crate::operation::{Operation, ParamKey};
use crate::params::{OutputFormat, ParameterSet};
use serde_json::Value;

/// Most item names listed in a summary.
pub const MAX_LISTED: usize = 10;

pub fn render(operation: Operation, params: &ParameterSet, result: &ExecutionResult) -> String {
    if params.format() == OutputFormat::Json && is_json(&result.stdout) {
        return result.stdout.clone();
    }
    match operation {
        Operation::LinkBilling => format!(
            "Linked billing account {} to project {}.",
            params.get(ParamKey::BillingAccountId).unwrap_or("?"),
            params.get(ParamKey::ProjectId).unwrap_or("?"),
        ),
        Operation::DescribeProject => {
            summarize_project(params.get(ParamKey::ProjectId), &result.stdout)
        }
        _ => summarize_list(operation.schema().noun, &list_items(operation, &result.stdout)),
    }
}

fn is_json(stdout: &str) -> bool {
    let trimmed = stdout.trim();
    !trimmed.is_empty() && serde_json::from_str::<Value>(trimmed).is_ok()
}

pub fn summarize_list(noun: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("No {} found.", noun);
    }
    let noun = if items.len() == 1 {
        noun.strip_suffix('s').unwrap_or(noun)
    } else {
        noun
    };
    let shown = items
        .iter()
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let hidden = items.len().saturating_sub(MAX_LISTED);
    if hidden > 0 {
        format!("Found {} {}: {}, ... and {} more", items.len(), noun, shown, hidden)
    } else {
        format!("Found {} {}: {}", items.len(), noun, shown)
    }
}

fn list_items(operation: Operation, stdout: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(stdout.trim()) {
        Ok(Value::Array(items)) => items.iter().map(|i| json_item_name(operation, i)).collect(),
        _ => table_items(stdout),
    }
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| matches!(c, '-' | '+' | ' ' | '='))
}

fn is_header(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_uppercase()) && !line.chars().any(|c| c.is_lowercase())
}

fn table_items(stdout: &str) -> Vec<String> {
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = match lines.first() {
        Some(first) if is_header(first) => 1,
        Some(_) if lines.get(1).is_some_and(|l| is_separator(l)) => 1,
        _ => 0,
    };
    lines
        .iter()
        .skip(skip)
        .filter(|l| !is_separator(l))
        .filter_map(|l| l.split_whitespace().next())
        .map(String::from)
        .collect()
}

fn name_keys(operation: Operation) -> &'static [&'static str] {
    match operation {
        Operation::ListProjects => &["projectId", "name"],
        Operation::ListBillingAccounts => &["displayName", "name"],
        Operation::ListBuckets => &["name", "url", "storage_url"],
        Operation::ListDatasets => &["datasetReference.datasetId", "id"],
        Operation::ListTables => &["tableReference.tableId", "id"],
        _ => &["name", "id"],
    }
}

fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |value, key| value.get(key))
}

fn json_item_name(operation: Operation, item: &Value) -> String {
    if let Value::String(s) = item {
        return s.clone();
    }
    name_keys(operation)
        .iter()
        .filter_map(|key| lookup(item, key).and_then(Value::as_str))
        .next()
        // Resource names such as `projects/123/services/x` are reduced to the last segment.
        .map(|name| name.trim_end_matches('/').rsplit('/').next().unwrap_or(name).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn summarize_project(project_id: Option<&str>, stdout: &str) -> String {
    let field = |key: &str| -> Option<String> {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(stdout.trim()) {
            return map.get(key).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        }
        stdout.lines().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            (k == key).then(|| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        })
    };

    let id = field("projectId")
        .or_else(|| project_id.map(String::from))
        .unwrap_or_else(|| "?".to_string());
    let details: Vec<String> = [("name", "name"), ("number", "projectNumber"), ("state", "lifecycleState")]
        .iter()
        .filter_map(|(label, key)| field(*key).map(|v| format!("{}: {}", label, v)))
        .collect();

    if details.is_empty() {
        let body = stdout.trim();
        if body.is_empty() {
            format!("Project {}", id)
        } else {
            format!("Project {}\n{}", id, body)
        }
    } else {
        format!("Project {} ({})", id, details.join(", "))
    }
}
