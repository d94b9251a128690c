//! Real child processes behind fake `gcloud` scripts.
#![cfg(unix)]

use gcp_assist::config::AssistConfig;
use gcp_assist::executor::CancelToken;
use gcp_assist::{AssistError, Assistant};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// Writing an executable while another test forks can fail with ETXTBSY.
static SCRIPT_MUTEX: Mutex<()> = Mutex::new(());

fn fake_gcloud(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("gcloud");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn assistant(gcloud: PathBuf, timeout_secs: u64) -> Assistant {
    let mut config = AssistConfig::default();
    config.cli.gcloud_path = Some(gcloud);
    config.cli.bq_path = Some("bq".into());
    config.cli.timeout_secs = timeout_secs;
    Assistant::from_config(&config)
}

#[test]
fn test_script_output_is_summarized() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let gcloud = fake_gcloud(
        temp.path(),
        "echo \"NAME REGION STATUS\"\necho \"zone-$1-$2 region UP\"",
    );
    let out = assistant(gcloud, 10).handle("list zones");
    assert_eq!(out, "Found 1 zone: zone-compute-zones");
}

#[test]
fn test_prompts_are_disabled() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let gcloud = fake_gcloud(
        temp.path(),
        "echo NAME\necho \"prompts-off-$CLOUDSDK_CORE_DISABLE_PROMPTS\"\nread line && echo got-stdin",
    );
    let out = assistant(gcloud, 10).handle("list regions");
    assert_eq!(out, "Found 1 region: prompts-off-1");
}

#[test]
fn test_nonzero_exit_surfaces_stderr() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let gcloud = fake_gcloud(temp.path(), "echo 'ERROR: quota exceeded' >&2\nexit 2");
    let assistant = assistant(gcloud, 10);
    match assistant.run("list zones", &CancelToken::new()) {
        Err(AssistError::ExternalCommandError { exit_code, stderr }) => {
            assert_eq!(exit_code, 2);
            assert!(stderr.contains("quota exceeded"));
        }
        other => panic!("expected ExternalCommandError, got {:?}", other),
    }
}

#[test]
fn test_timeout_leaves_no_process_behind() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let pid_file = temp.path().join("pid");
    let gcloud = fake_gcloud(
        temp.path(),
        &format!("echo $$ > '{}'\nexec sleep 30", pid_file.display()),
    );

    let started = Instant::now();
    let result = assistant(gcloud, 1).run("list zones", &CancelToken::new());
    assert!(
        matches!(result, Err(AssistError::ExecutionTimeout(d)) if d == Duration::from_secs(1)),
        "got {:?}",
        result
    );
    assert!(started.elapsed() < Duration::from_secs(10));

    #[cfg(target_os = "linux")]
    {
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let proc_dir = PathBuf::from(format!("/proc/{}", pid.trim()));
        assert!(!proc_dir.exists(), "process {} still exists", pid.trim());
    }
}

#[test]
fn test_missing_executable_is_reported() {
    let temp = TempDir::new().unwrap();
    let reply = assistant(temp.path().join("no-such-gcloud"), 5).reply("list zones");
    assert!(!reply.is_success());
    assert!(reply.to_string().contains("Executable not found"));
}

/// Whether `pid` is gone or only a zombie waiting for its new parent to reap it.
#[cfg(target_os = "linux")]
fn process_ended(pid: &str) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let ended = match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Err(_) => true,
            // The state field follows the parenthesized command name.
            Ok(stat) => stat
                .rsplit_once(')')
                .map(|(_, rest)| rest.trim_start().starts_with('Z'))
                .unwrap_or(false),
        };
        if ended || Instant::now() >= deadline {
            return ended;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn test_timeout_kills_background_children() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let pid_file = temp.path().join("pid");
    // No exec: the launcher stays the parent of the long-running worker.
    let gcloud = fake_gcloud(
        temp.path(),
        &format!("sleep 30 &\necho $! > '{}'\nwait", pid_file.display()),
    );

    let result = assistant(gcloud, 1).run("list zones", &CancelToken::new());
    assert!(
        matches!(result, Err(AssistError::ExecutionTimeout(_))),
        "got {:?}",
        result
    );

    #[cfg(target_os = "linux")]
    {
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(process_ended(pid.trim()), "worker {} outlived the timeout", pid.trim());
    }
}

#[test]
fn test_background_child_holding_output_cannot_outlast_timeout() {
    let _guard = SCRIPT_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp = TempDir::new().unwrap();
    let gcloud = fake_gcloud(temp.path(), "sleep 6 &\necho NAME\necho z1");

    let started = Instant::now();
    let result = assistant(gcloud, 1).run("list zones", &CancelToken::new());
    assert!(
        matches!(result, Err(AssistError::ExecutionTimeout(d)) if d == Duration::from_secs(1)),
        "got {:?}",
        result
    );
    assert!(started.elapsed() < Duration::from_secs(4));
}
