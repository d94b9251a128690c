//! Operations listing.

use super::to_pretty_json;
use crate::error::AssistError;
use crate::operation::Operation;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_operations_text() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Operation", "Command", "Example"]);
    for op in Operation::ALL {
        table.add_row(vec![
            op.name().to_string(),
            op.cli_usage(),
            op.schema().example.to_string(),
        ]);
    }
    format!(
        "{}\n{}\nQueries may be plain English or one of the commands above.",
        "Supported operations".bold().underline(),
        table
    )
}

pub fn format_operations_json() -> Result<String, AssistError> {
    let ops: Vec<serde_json::Value> = Operation::ALL
        .iter()
        .map(|op| {
            let schema = op.schema();
            json!({
                "operation": op.name(),
                "tool": schema.tool.binary_name(),
                "command": op.cli_usage(),
                "required": schema.required,
                "optional": schema.optional,
                "example": schema.example,
            })
        })
        .collect();
    to_pretty_json(&ops)
}
