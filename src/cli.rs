//! CLI domain: parse, route, help, output, and presentation only.
//! No pipeline logic; the route table dispatches to the assistant.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_json, format_config_text, format_config_toml, format_operations_json,
    format_operations_text, format_plan_json, format_plan_text,
};
pub use route::{CommandOutput, RunContext};
