//! Per-workspace settings for gcp-assist.
//!
//! A checkout can pin a default project, tool paths or a timeout in
//! `config/config.toml`, with an optional `config/<name>.toml` overlay picked by
//! `GCP_ASSIST_ENV` (for example `staging.toml` pointing at a staging project).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selects the overlay file under `config/`.
pub const ENV_VAR: &str = "GCP_ASSIST_ENV";

/// Overlay used when [`ENV_VAR`] is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Overlay name from the process environment.
pub fn environment_name() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Workspace files that exist for `environment`, lowest precedence first.
pub fn config_files(workspace_root: &Path, environment: &str) -> Vec<PathBuf> {
    let dir = workspace_root.join("config");
    [
        dir.join("config.toml"),
        dir.join(format!("{}.toml", environment)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

/// Layer the workspace files for the current environment onto `builder`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let environment = environment_name();
    let files = config_files(workspace_root, &environment);
    debug!(
        workspace = %workspace_root.display(),
        environment = %environment,
        files = files.len(),
        "Workspace configuration"
    );
    Ok(files.into_iter().fold(builder, |builder, path| {
        builder.add_source(File::from(path).required(false))
    }))
}
