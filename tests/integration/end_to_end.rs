//! Full pipeline against a scripted process runner.

use super::test_utils::{assistant_with, ScriptedRunner};
use gcp_assist::tool::ReplyStatus;
use gcp_assist::{AssistError, ParamKey};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_bq_json_listing_passes_through() {
    let stdout = "[{\"tableReference\":{\"tableId\":\"orders\"}}]\n";
    let runner = ScriptedRunner::succeeding(stdout);
    let assistant = assistant_with(runner.clone(), None);

    let plan = assistant.plan("bq ls --format=json DATASET_NAME").unwrap();
    assert_eq!(plan.params.get(ParamKey::Dataset), Some("DATASET_NAME"));
    assert_eq!(plan.params.get(ParamKey::Format), Some("json"));
    assert_eq!(plan.params.len(), 2);

    let out = assistant.handle("bq ls --format=json DATASET_NAME");
    assert_eq!(out, stdout);
    assert_eq!(runner.calls(), vec![vec!["bq", "ls", "--format=json", "DATASET_NAME"]]);
}

#[test]
fn test_list_projects_summary() {
    let stdout = "PROJECT_ID  NAME   PROJECT_NUMBER\nalpha  Alpha  1\nbeta  Beta  2\ngamma  Gamma  3\n";
    let runner = ScriptedRunner::succeeding(stdout);
    let assistant = assistant_with(runner.clone(), None);

    let plan = assistant.plan("List all GCP projects").unwrap();
    assert_eq!(plan.params.get(ParamKey::Format), Some("table"));
    assert_eq!(plan.params.len(), 1);

    let out = assistant.handle("List all GCP projects");
    assert!(out.starts_with("Found 3 projects: "), "{}", out);
    assert_eq!(out, "Found 3 projects: alpha, beta, gamma");
    assert_eq!(runner.calls(), vec![vec!["gcloud", "projects", "list"]]);
}

#[test]
fn test_default_project_does_not_touch_list_projects() {
    let runner = ScriptedRunner::succeeding("PROJECT_ID\nalpha\n");
    let assistant = assistant_with(runner.clone(), Some("home-proj"));
    assistant.handle("List all GCP projects");
    assert_eq!(runner.calls(), vec![vec!["gcloud", "projects", "list"]]);
}

#[test]
fn test_default_project_fills_project_scoped_listing() {
    let runner = ScriptedRunner::succeeding("NAME  ZONE\nvm-1  us-east1-b\n");
    let assistant = assistant_with(runner.clone(), Some("home-proj"));
    let out = assistant.handle("list instances");
    assert_eq!(out, "Found 1 instance: vm-1");
    assert_eq!(
        runner.calls(),
        vec![vec!["gcloud", "compute", "instances", "list", "--project=home-proj"]]
    );
}

#[test]
fn test_explicit_project_beats_default() {
    let runner = ScriptedRunner::succeeding("");
    let assistant = assistant_with(runner.clone(), Some("home-proj"));
    assistant.handle("list services in project other-proj");
    assert_eq!(
        runner.calls(),
        vec![vec!["gcloud", "services", "list", "--project=other-proj"]]
    );
}

#[test]
fn test_link_billing_missing_both_parameters() {
    let runner = ScriptedRunner::succeeding("");
    let assistant = assistant_with(runner.clone(), Some("home-proj"));

    match assistant.plan("Link billing account to project") {
        Err(AssistError::MissingParameter(keys)) => {
            assert_eq!(keys, vec![ParamKey::ProjectId, ParamKey::BillingAccountId]);
        }
        other => panic!("expected MissingParameter, got {:?}", other.map(|p| p.operation)),
    }
    let reply = assistant.reply("Link billing account to project");
    assert_eq!(reply.status, ReplyStatus::Error);
    let message = reply.error_message.unwrap();
    assert!(message.contains("project_id"));
    assert!(message.contains("billing_account_id"));
    assert!(runner.calls().is_empty(), "no process may be spawned");
}

#[test]
fn test_link_billing_success() {
    let runner = ScriptedRunner::succeeding("billingAccountName: billingAccounts/0X0X-1\n");
    let assistant = assistant_with(runner.clone(), None);
    let out =
        assistant.handle("gcloud billing projects link alpha --billing-account=billingAccounts/0X0X-1");
    assert_eq!(out, "Linked billing account 0X0X-1 to project alpha.");
    assert_eq!(
        runner.calls(),
        vec![vec![
            "gcloud",
            "billing",
            "projects",
            "link",
            "alpha",
            "--billing-account=0X0X-1"
        ]]
    );
}

#[test]
fn test_describe_project_summary() {
    let stdout = "createTime: '2020-01-01T00:00:00.000Z'\nlifecycleState: ACTIVE\nname: Alpha\nprojectId: alpha\nprojectNumber: '123'\n";
    let runner = ScriptedRunner::succeeding(stdout);
    let assistant = assistant_with(runner, None);
    assert_eq!(
        assistant.handle("describe project alpha"),
        "Project alpha (name: Alpha, number: 123, state: ACTIVE)"
    );
}

#[test]
fn test_metacharacters_never_reach_a_process() {
    let runner = ScriptedRunner::succeeding("");
    let assistant = assistant_with(runner.clone(), None);
    for input in [
        "describe project foo;rm",
        "gcloud projects describe $(whoami)",
        "list instances in project `id`",
        "gcloud services list --project=a|b",
        "show bigquery tables in dataset x&&y",
    ] {
        match assistant.plan(input) {
            Err(AssistError::InvalidParameter { .. }) => {}
            other => panic!("{:?}: expected InvalidParameter, got {:?}", input, other.map(|p| p.invocation)),
        }
        assert!(!assistant.reply(input).is_success());
    }
    assert!(runner.calls().is_empty());
}

#[test]
fn test_failed_command_reports_stderr_and_suggestions() {
    let runner = ScriptedRunner::exiting(1, "ERROR: (gcloud.compute.instances.list) permission denied\n");
    let assistant = assistant_with(runner, None);
    let reply = assistant.reply("list instances in project alpha");
    assert_eq!(reply.status, ReplyStatus::Error);
    assert!(reply.error_message.as_deref().unwrap().contains("permission denied"));
    assert!(reply
        .suggested_commands
        .as_deref()
        .unwrap()
        .contains("gcloud compute instances list"));
}

#[test]
fn test_timeout_is_reported() {
    let runner = ScriptedRunner::failing(|| AssistError::ExecutionTimeout(Duration::from_secs(30)));
    let assistant = assistant_with(runner, None);
    let out = assistant.handle("list zones");
    assert!(out.contains("timed out"), "{}", out);
}

#[test]
fn test_unrecognized_request() {
    let runner = ScriptedRunner::succeeding("");
    let assistant = assistant_with(runner.clone(), None);
    let out = assistant.handle("what's the weather in New York?");
    assert!(out.starts_with("I'm not sure how to process your query"));
    assert!(out.contains("gcloud projects list"));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_long_listing_is_truncated() {
    let mut stdout = String::from("NAME  REGION  STATUS\n");
    for i in 0..25 {
        stdout.push_str(&format!("zone-{:02}  region  UP\n", i));
    }
    let assistant = assistant_with(ScriptedRunner::succeeding(&stdout), None);
    let out = assistant.handle("list zones");
    assert!(out.starts_with("Found 25 zones: zone-00, zone-01"), "{}", out);
    assert!(out.ends_with(", ... and 15 more"), "{}", out);
}

#[test]
fn test_concurrent_requests_share_one_assistant() {
    let runner = ScriptedRunner::succeeding("NAME\nsvc\n");
    let assistant = Arc::new(assistant_with(runner.clone(), None));
    std::thread::scope(|scope| {
        for i in 0..8 {
            let assistant = Arc::clone(&assistant);
            scope.spawn(move || {
                let out = assistant.handle(&format!("list services in project proj-{}", i));
                assert_eq!(out, "Found 1 service: svc");
            });
        }
    });
    let mut projects: Vec<String> = runner.calls().into_iter().map(|argv| argv[3].clone()).collect();
    projects.sort();
    let expected: Vec<String> = (0..8).map(|i| format!("--project=proj-{}", i)).collect();
    assert_eq!(projects, expected);
}
