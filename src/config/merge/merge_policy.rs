//! Merge rules: defaults, override order, conflict handling.

use crate::config::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
/// Later sources override earlier ones key by key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("cli.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("model.model", DEFAULT_MODEL)
}
