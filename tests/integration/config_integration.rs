//! Layered configuration loading through the public entry points.

use super::test_utils::with_xdg_env;
use gcp_assist::cli::RunContext;
use gcp_assist::config::ConfigLoader;
use gcp_assist::AssistError;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_files() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("ws");
        std::fs::create_dir_all(&workspace).unwrap();
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.cli.timeout_secs, 30);
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert!(config.cli.default_project.is_none());
        assert!(config.model.api_key.is_none());
    });
}

#[test]
fn test_precedence_global_workspace_env() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        write(
            &temp.path().join("xdg/gcp-assist/config.toml"),
            "[cli]\ndefault_project = \"global-proj\"\ntimeout_secs = 12\n\n[model]\nmodel = \"global-model\"\n",
        );
        let workspace = temp.path().join("ws");
        write(
            &workspace.join("config/config.toml"),
            "[cli]\ndefault_project = \"ws-proj\"\n",
        );

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.cli.default_project.as_deref(), Some("ws-proj"));
        assert_eq!(config.cli.timeout_secs, 12);
        assert_eq!(config.model.model, "global-model");

        std::env::set_var("GCP_ASSIST_DEFAULT_PROJECT", "env-proj");
        std::env::set_var("GOOGLE_API_KEY", "AIzaTestKey0000");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.cli.default_project.as_deref(), Some("env-proj"));
        assert_eq!(config.model.api_key_status(), "set (AIza...)");
    });
}

#[test]
fn test_environment_specific_workspace_file() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("ws");
        write(&workspace.join("config/config.toml"), "[cli]\ntimeout_secs = 20\n");
        write(&workspace.join("config/staging.toml"), "[cli]\ntimeout_secs = 5\n");
        std::env::set_var("GCP_ASSIST_ENV", "staging");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.cli.timeout_secs, 5);
    });
}

#[test]
fn test_explicit_file_skips_other_files() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("ws");
        write(&workspace.join("config/config.toml"), "[cli]\ndefault_project = \"ws-proj\"\n");
        let explicit = temp.path().join("explicit.toml");
        write(&explicit, "[cli]\nbq_path = \"/opt/sdk/bq\"\n");

        let ctx = RunContext::new(workspace, Some(explicit)).unwrap();
        assert!(ctx.config().cli.default_project.is_none());
        assert_eq!(
            ctx.config().cli.bq_path.as_deref(),
            Some(Path::new("/opt/sdk/bq"))
        );
    });
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let workspace = temp.path().join("ws");
        write(
            &workspace.join("config/config.toml"),
            "[cli]\ndefault_project = \"bad;project\"\n",
        );
        match RunContext::new(workspace.clone(), None) {
            Err(AssistError::ConfigError(msg)) => assert!(msg.contains("default") || msg.contains("project_id")),
            Err(other) => panic!("expected ConfigError, got {}", other),
            Ok(_) => panic!("invalid config accepted"),
        }

        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            RunContext::new(workspace, Some(missing)),
            Err(AssistError::ConfigError(_))
        ));
    });
}
