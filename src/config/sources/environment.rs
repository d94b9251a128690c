//! Environment variable overrides. These take precedence over every file source.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

/// `(variable, config key)` pairs.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GCLOUD_PATH", "cli.gcloud_path"),
    ("BQ_PATH", "cli.bq_path"),
    ("GCP_ASSIST_DEFAULT_PROJECT", "cli.default_project"),
    ("GCP_ASSIST_TIMEOUT_SECS", "cli.timeout_secs"),
    ("GOOGLE_API_KEY", "model.api_key"),
    ("GCP_ASSIST_MODEL", "model.model"),
];

/// Apply every set, non-empty variable from [`ENV_OVERRIDES`].
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in ENV_OVERRIDES {
        let value = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        builder = builder.set_override_option(*key, value)?;
    }
    Ok(builder)
}
