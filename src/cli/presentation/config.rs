//! Resolved configuration output for `config`.

use super::to_pretty_json;
use crate::config::AssistConfig;
use crate::error::AssistError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Copy of the config that is safe to print.
fn masked(config: &AssistConfig) -> AssistConfig {
    let mut shown = config.clone();
    if shown.model.api_key.is_some() {
        shown.model.api_key = Some(config.model.api_key_status());
    }
    shown
}

pub fn format_config_text(config: &AssistConfig) -> String {
    let paths = config.cli.resolve_paths();
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Setting", "Value"]);
    let rows = [
        ("cli.gcloud_path", paths.gcloud.display().to_string()),
        ("cli.bq_path", paths.bq.display().to_string()),
        (
            "cli.default_project",
            config
                .cli
                .default_project
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("cli.timeout_secs", config.cli.timeout_secs.to_string()),
        ("model.model", config.model.model.clone()),
        ("model.api_key", config.model.api_key_status()),
        ("logging.level", config.logging.level.clone()),
        ("logging.format", config.logging.format.clone()),
        ("logging.output", config.logging.output.clone()),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    format!("{}\n{}", "Configuration".bold().underline(), table)
}

pub fn format_config_json(config: &AssistConfig) -> Result<String, AssistError> {
    to_pretty_json(&masked(config))
}

pub fn format_config_toml(config: &AssistConfig) -> Result<String, AssistError> {
    toml::to_string_pretty(&masked(config))
        .map_err(|e| AssistError::Internal(format!("Failed to serialize config: {}", e)))
}
