use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn taskdeck(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").unwrap();
    cmd.current_dir(temp_dir);
    cmd.env_remove("TASKDECK_STATE_DIR");
    cmd
}

fn pm(temp_dir: &TempDir, operation: &str, args: &str) -> Command {
    let mut cmd = taskdeck(temp_dir);
    cmd.args(["pm", "call", operation, "--args", args]);
    cmd
}

fn gantt(temp_dir: &TempDir, operation: &str, args: &str) -> Command {
    let mut cmd = taskdeck(temp_dir);
    cmd.args(["gantt", "call", operation, "--args", args]);
    cmd
}

#[test]
fn test_pm_workflow() {
    let temp_dir = TempDir::new().unwrap();

    pm(&temp_dir, "initialize_project", r#"{"project_name": "Demo"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'Demo' initialized successfully."));
    assert!(temp_dir.path().join(".context/pm_state.json").exists());

    pm(&temp_dir, "assign_task", r#"{"agent": "AR", "task_description": "Design API"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Task TASK-001 assigned to AR: Design API"));

    pm(
        &temp_dir,
        "assign_task",
        r#"{"agent": "BD", "task_description": "Build API", "priority": "HIGH"}"#,
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("TASK-002"));

    pm(&temp_dir, "complete_task", r#"{"task_id": "TASK-001", "output_summary": "done"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Task TASK-001 marked complete."));

    let output = pm(&temp_dir, "get_project_status", "{}").output().unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["tasks"][0]["status"], "complete");
    assert_eq!(status["tasks"][1]["status"], "assigned");
    assert_eq!(status["tasks"][1]["priority"], "HIGH");
}

#[test]
fn test_pm_not_found_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    pm(&temp_dir, "initialize_project", r#"{"project_name": "Demo"}"#)
        .assert()
        .success();
    let path = temp_dir.path().join(".context/pm_state.json");
    let before = fs::read(&path).unwrap();

    pm(&temp_dir, "complete_task", r#"{"task_id": "TASK-404", "output_summary": "x"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Task TASK-404 not found."));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_missing_argument_fails() {
    let temp_dir = TempDir::new().unwrap();

    pm(&temp_dir, "assign_task", r#"{"agent": "AR"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid arguments for assign_task"));
    assert!(!temp_dir.path().join(".context").exists());
}

#[test]
fn test_malformed_args_json_fails() {
    let temp_dir = TempDir::new().unwrap();

    gantt(&temp_dir, "create_project", "{project_name")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--args is not valid JSON"));
}

#[test]
fn test_corrupt_state_fails_without_reset() {
    let temp_dir = TempDir::new().unwrap();
    let state_dir = temp_dir.path().join(".context");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(state_dir.join("gantt_state.json"), "not json").unwrap();

    gantt(&temp_dir, "create_task", r#"{"name": "A", "duration_hours": 1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is corrupt"));
    assert_eq!(
        fs::read_to_string(state_dir.join("gantt_state.json")).unwrap(),
        "not json"
    );
}

#[test]
fn test_gantt_timeline() {
    let temp_dir = TempDir::new().unwrap();

    gantt(&temp_dir, "create_project", r#"{"project_name": "Demo", "start_date": "2024-06-01"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Start: 2024-06-01"));
    gantt(&temp_dir, "create_task", r#"{"name": "Design", "duration_hours": 8}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Task GT-001 created: Design (8h)"));
    gantt(
        &temp_dir,
        "create_task",
        r#"{"name": "Build", "duration_hours": 16, "dependencies": ["GT-001"]}"#,
    )
    .assert()
    .success();

    gantt(&temp_dir, "get_timeline", "{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Project: Demo"))
        .stdout(predicate::str::contains("### Iteration 1"))
        .stdout(predicate::str::contains("[GT-002] Build (16h, unassigned) (deps: GT-001)"));
}

#[test]
fn test_state_dir_flag() {
    let temp_dir = TempDir::new().unwrap();
    let custom = temp_dir.path().join("state");

    let mut cmd = taskdeck(&temp_dir);
    cmd.arg("--state-dir")
        .arg(&custom)
        .args(["gantt", "call", "create_project", "--args", r#"{"project_name": "Demo"}"#]);
    cmd.assert().success();

    assert!(custom.join("gantt_state.json").exists());
    assert!(!temp_dir.path().join(".context").exists());
}

#[test]
fn test_unknown_operation() {
    let temp_dir = TempDir::new().unwrap();

    gantt(&temp_dir, "delete_everything", "{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown tool: delete_everything"));
}

#[test]
fn test_tools_catalog() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = taskdeck(&temp_dir);
    cmd.args(["pm", "tools"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("initialize_project"))
        .stdout(predicate::str::contains("pass_context"));
}
