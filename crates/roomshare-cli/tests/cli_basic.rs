//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs and saved files.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roomshare"));
    cmd.env("ROOMSHARE_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = command(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn run_err(dir: &Path, args: &[&str]) -> String {
    let (_, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 1, "command {args:?} unexpectedly succeeded");
    assert!(stderr.contains("error: "), "unexpected stderr: {stderr}");
    stderr
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(
        dir.path(),
        &["add", "assignment", "buy", "groceries", "--at", "01/01/2099 10:00", "--assignee", "harry"],
    );
    assert!(out.contains("Added: [A][ ] buy groceries (harry)"));

    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("1. [A][ ] buy groceries"));
    assert!(out.contains("Progress: 0/1 done (0%)"));
    assert!(dir.path().join("data.json").exists());
}

#[test]
fn test_duplicate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let args = ["add", "assignment", "essay", "--at", "01/01/2099 10:00"];
    run_ok(dir.path(), &args);
    let err = run_err(dir.path(), &args);
    assert!(err.contains("Duplicate task detected: same as task 1"));
}

#[test]
fn test_meeting_clash_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &["add", "meeting", "test1", "--at", "01/01/2099 17:00", "--duration", "2", "--unit", "hours"],
    );
    let err = run_err(dir.path(), &["add", "meeting", "test2", "--at", "01/01/2099 19:00"]);
    assert!(err.contains("Time clash detected with task 1"));

    run_ok(dir.path(), &["add", "meeting", "test3", "--at", "01/01/2099 10:00"]);
}

#[test]
fn test_done_rejects_leave() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &[
            "add", "leave", "holiday", "--at", "01/01/2099 00:00", "--until", "05/01/2099 00:00", "--assignee", "sally",
        ],
    );
    let err = run_err(dir.path(), &["done", "1"]);
    assert!(err.contains("Leave cannot be set to done"));
}

#[test]
fn test_out_of_range_index() {
    let dir = TempDir::new().unwrap();
    let err = run_err(dir.path(), &["done", "1"]);
    assert!(err.contains("The active list is empty"));

    run_ok(dir.path(), &["add", "assignment", "essay", "--at", "01/01/2099 10:00"]);
    let err = run_err(dir.path(), &["delete", "1-3"]);
    assert!(err.contains("out of bounds"));
}

#[test]
fn test_past_tasks_move_to_overdue() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "assignment", "old", "essay", "--at", "01/01/2000 10:00"]);

    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("1 task(s) moved to overdue"));
    assert!(out.contains("There are no tasks in your list."));

    let out = run_ok(dir.path(), &["overdue"]);
    assert!(out.contains("old essay"));

    run_ok(dir.path(), &["reschedule", "1", "--at", "01/01/2099 10:00"]);
    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("old essay"));
}

#[test]
fn test_sort_is_remembered() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "assignment", "zebra", "--at", "01/01/2099 10:00"]);
    run_ok(dir.path(), &["add", "assignment", "apple", "--at", "02/01/2099 10:00"]);
    run_ok(dir.path(), &["sort", "alphabetical"]);

    let out = run_ok(dir.path(), &["list"]);
    let apple = out.find("apple").unwrap();
    let zebra = out.find("zebra").unwrap();
    assert!(apple < zebra);

    assert_eq!(run_ok(dir.path(), &["config", "get", "list.default_sort"]).trim(), "alphabetical");
    let (_, stderr, code) = run_cli(dir.path(), &["sort", "random"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("random"));
}

#[test]
fn test_negative_snooze_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "assignment", "essay", "--at", "01/01/2099 10:00"]);
    let err = run_err(dir.path(), &["snooze", "1", "-1", "hours"]);
    assert!(err.contains("cannot be negative"));
    run_ok(dir.path(), &["snooze", "1", "2", "days"]);
}

#[test]
fn test_subtasks_and_show() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &["add", "assignment", "essay", "--at", "01/01/2099 10:00", "--assignee", "harry"],
    );
    run_ok(dir.path(), &["subtask", "add", "1", "outline,draft"]);
    run_ok(dir.path(), &["subtask", "done", "1", "2"]);

    let out = run_ok(dir.path(), &["show", "harry"]);
    assert!(out.contains("1. [ ] outline"));
    assert!(out.contains("2. [X] draft"));

    let err = run_err(dir.path(), &["show", "sally"]);
    assert!(err.contains("The assigned list is empty"));
}

#[test]
fn test_config_commands() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["config", "list"]);
    assert!(out.contains("storage.active_file = data.json"));

    run_ok(dir.path(), &["config", "set", "log.level", "info"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "log.level"]).trim(), "info");

    run_err(dir.path(), &["config", "get", "nope"]);
    run_ok(dir.path(), &["config", "reset"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "log.level"]).trim(), "warn");
}

#[test]
fn test_log_export() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "assignment", "essay", "--at", "01/01/2099 10:00"]);
    let out = run_ok(dir.path(), &["log"]);
    assert!(out.contains("Log written to"));

    let logs: Vec<_> = std::fs::read_dir(dir.path().join("logs")).unwrap().collect();
    assert_eq!(logs.len(), 1);
}

#[test]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();
    let mut child = command(dir.path())
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(
            b"add assignment \"team essay\" --at \"01/01/2099 10:00\"\n\
              add meeting 'house chat' --at '02/01/2099 09:00'\n\
              find \"unclosed\n\
              done 5\n\
              delete 1\n\
              restore 1\n\
              list\n\
              bye\n",
        )
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("error: missing closing quote"));
    assert!(stderr.contains("error: Index 5 is out of bounds"));
    assert!(stdout.contains("Task restored."));
    assert!(stdout.contains("[A][ ] team essay"));
    assert!(stdout.contains("[M][ ] house chat"));
    assert!(stdout.contains("Your tasks have been saved."));

    let saved = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
    assert!(saved.contains("team essay"));
    assert!(saved.contains("house chat"));
}

#[test]
fn test_list_hides_finished_tasks() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "assignment", "essay", "--at", "01/01/2099 10:00"]);
    run_ok(dir.path(), &["add", "assignment", "laundry", "--at", "02/01/2099 10:00"]);
    run_ok(dir.path(), &["done", "1"]);

    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("laundry"));
    assert!(!out.contains("essay"));
    assert!(out.contains("Progress: 1/2 done (50%)"));

    let out = run_ok(dir.path(), &["completed"]);
    assert!(out.contains("[A][X] essay"));
}

#[test]
fn test_update_edits_a_task() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["add", "meeting", "standup", "--at", "01/01/2099 09:00"]);

    let out = run_ok(
        dir.path(),
        &[
            "update", "1", "--description", "daily standup", "--assignee", "sally", "--duration", "30", "--unit",
            "minutes",
        ],
    );
    assert!(out.contains("Updated: [M][ ] daily standup (sally)"));
    assert!(out.contains("(30 minutes)"));

    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("1. [M][ ] daily standup (sally)"));

    let err = run_err(dir.path(), &["update", "1"]);
    assert!(err.contains("nothing to update"));
}

#[test]
fn test_conflicting_update_is_rejected() {
    let dir = TempDir::new().unwrap();
    run_ok(
        dir.path(),
        &["add", "meeting", "review", "--at", "01/01/2099 17:00", "--duration", "2", "--unit", "hours"],
    );
    run_ok(dir.path(), &["add", "meeting", "dinner", "--at", "01/01/2099 10:00"]);
    let before = run_ok(dir.path(), &["list"]);

    let err = run_err(dir.path(), &["update", "2", "--at", "01/01/2099 18:00"]);
    assert!(err.contains("Time clash detected with task 1"));
    let err = run_err(dir.path(), &["update", "2", "--description", "review", "--at", "01/01/2099 17:00"]);
    assert!(err.contains("Duplicate task detected: same as task 1"));

    assert_eq!(run_ok(dir.path(), &["list"]), before);
}

#[test]
fn test_broken_config_warns_and_uses_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "list = [").unwrap();

    let (stdout, stderr, code) = run_cli(dir.path(), &["list"]);
    assert_eq!(code, 0, "list failed: {stderr}");
    assert!(stdout.contains("There are no tasks in your list."));
    assert!(stderr.contains("using default configuration"));
}
