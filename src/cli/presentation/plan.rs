//! Plan output for `plan`.

use super::to_pretty_json;
use crate::assistant::Plan;
use crate::error::AssistError;
use crate::intent::Strategy;

pub fn format_plan_text(plan: &Plan) -> String {
    let strategy = match plan.hints.strategy {
        Strategy::Cli => "cli",
        Strategy::NaturalLanguage => "natural language",
    };
    let mut lines = vec![
        format!("Operation:  {}", plan.operation),
        format!("Matched as: {}", strategy),
        "Parameters:".to_string(),
    ];
    for (key, value) in plan.params.iter() {
        lines.push(format!("  {} = {}", key, value));
    }
    lines.push(format!("Command:    {}", plan.invocation));
    lines.join("\n")
}

pub fn format_plan_json(plan: &Plan) -> Result<String, AssistError> {
    to_pretty_json(plan)
}
