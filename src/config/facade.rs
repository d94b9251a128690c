//! Config loader: assembles sources in precedence order and deserializes the result.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::AssistConfig;
use crate::error::AssistError;
use config::File;
use std::path::{Path, PathBuf};

/// Loads [`AssistConfig`] from defaults, files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then workspace files under `workspace_root`,
    /// then environment overrides.
    pub fn load(workspace_root: &Path) -> Result<AssistConfig, AssistError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;
        let config: AssistConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Defaults, then exactly `path` (which must exist), then environment overrides.
    pub fn load_from_file(path: &Path) -> Result<AssistConfig, AssistError> {
        if !path.exists() {
            return Err(AssistError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path.to_path_buf()));
        let builder = environment::add_to_builder(builder)?;
        let config: AssistConfig = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Global config file location, if one can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
