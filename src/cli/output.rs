//! CLI output: error mapping from pipeline errors to the CLI surface.

use crate::error::AssistError;

/// Map an error to the line printed on stderr.
pub fn map_error(e: &AssistError) -> String {
    match e {
        AssistError::ConfigError(_) => {
            format!("{}\nCheck config/config.toml, the global config file, or --config.", e)
        }
        _ => e.to_string(),
    }
}
