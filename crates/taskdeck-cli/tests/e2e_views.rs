//! E2E CLI tests covering:
//! - Screen reports (`td dashboard`, `td tasks`, `td team`, `td notifications`)
//! - Error codes on stderr for unknown tasks, bad filters and refused views
//! - Dataset round-trip through `td fixture` and `--fixture`
//! - Project config (`.taskdeck/config.toml`) picked up from the working dir
//!
//! Each test runs `td` as a subprocess in an isolated temp directory with a
//! pinned clock.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

const NOW: &str = "2026-06-01T12:00:00Z";

/// Build a Command targeting the `td` binary, rooted in `dir`, with user
/// config pointed into `dir` so the host's settings never leak in.
fn td_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("td"));
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env("TASKDECK_LOG", "error");
    cmd.env_remove("TASKDECK_USER");
    cmd.args(["--now", NOW]);
    cmd
}

fn json_of(dir: &Path, args: &[&str]) -> Value {
    let output = td_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("td should not crash");
    assert!(
        output.status.success(),
        "td {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--format json should produce valid JSON")
}

fn write_project_config(dir: &Path, body: &str) {
    std::fs::create_dir_all(dir.join(".taskdeck")).expect("mkdir .taskdeck");
    std::fs::write(dir.join(".taskdeck/config.toml"), body).expect("write config");
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

#[test]
fn dashboard_json_counts_own_tasks() {
    let dir = TempDir::new().unwrap();
    let json = json_of(dir.path(), &["--user", "u3", "dashboard"]);
    assert_eq!(json["stats"]["total"], 5);
    assert_eq!(json["stats"]["completed"], 2);
    assert_eq!(json["stats"]["overdue"], 1);
    assert_eq!(json["overdue"][0]["id"], "t1");
}

#[test]
fn tasks_board_always_has_four_columns() {
    let dir = TempDir::new().unwrap();
    let json = json_of(
        dir.path(),
        &["--user", "u3", "tasks", "--status", "completed"],
    );
    let columns = json["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 4);
    assert_eq!(json["total"], 5);
    assert_eq!(json["shown"], 2);
}

#[test]
fn tasks_text_is_one_card_per_line() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--user", "u3", "--format", "text", "tasks", "--priority", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t4  todo  "))
        .stdout(predicate::str::contains("t1  in-progress  "));
}

#[test]
fn notifications_unread_filter() {
    let dir = TempDir::new().unwrap();
    let json = json_of(dir.path(), &["--user", "u3", "notifications", "--unread"]);
    assert_eq!(json["unread"], 2);
    assert_eq!(json["items"].as_array().map(Vec::len), Some(2));
}

#[test]
fn show_hides_internal_notes_from_viewer() {
    let dir = TempDir::new().unwrap();
    let viewer = json_of(dir.path(), &["--user", "u6", "show", "t2"]);
    assert!(viewer.get("internal_notes").is_none_or(Value::is_null));
    assert_eq!(viewer["can_edit"], false);

    let owner = json_of(dir.path(), &["--user", "u3", "show", "t2"]);
    assert_eq!(owner["internal_notes"], "Client prefers the geometric mark.");
    assert_eq!(owner["can_edit"], true);
}

#[test]
fn menu_follows_role() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--user", "u6", "--format", "text", "menu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("viewer"))
        .stdout(predicate::str::contains("team").not());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_task_is_e2002() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--format", "text", "show", "t404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2002"))
        .stderr(predicate::str::contains("t404"));
}

#[test]
fn invalid_filter_value_is_e2003() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--format", "text", "tasks", "--status", "blocked"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2003"));
}

#[test]
fn unknown_user_is_e2001() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--user", "nobody", "--format", "json", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""))
        .stderr(predicate::str::contains("E2001"));
}

#[test]
fn enforced_roles_refuse_team_for_employee() {
    let dir = TempDir::new().unwrap();
    write_project_config(dir.path(), "[navigation]\nenforce_roles = true\n");

    td_cmd(dir.path())
        .args(["--user", "u3", "--format", "text", "team"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"))
        .stderr(predicate::str::contains("employee"));

    td_cmd(dir.path())
        .args(["--user", "u2", "--format", "text", "team"])
        .assert()
        .success();
}

#[test]
fn unenforced_roles_still_render_team() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--user", "u3", "--format", "text", "team"])
        .assert()
        .success();
}

#[test]
fn broken_project_config_is_e1001() {
    let dir = TempDir::new().unwrap();
    write_project_config(dir.path(), "[display\n");
    td_cmd(dir.path())
        .args(["--format", "text", "menu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"));
}

#[test]
fn ui_refuses_without_a_terminal() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--format", "text", "ui"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E5001"));
}

// ---------------------------------------------------------------------------
// Fixtures and config
// ---------------------------------------------------------------------------

#[test]
fn fixture_round_trips_through_a_file() {
    let dir = TempDir::new().unwrap();
    let output = td_cmd(dir.path())
        .args(["--user", "u2", "fixture"])
        .output()
        .expect("fixture should not crash");
    assert!(output.status.success());

    let path = dir.path().join("team.json");
    std::fs::write(&path, &output.stdout).expect("write fixture");

    let from_file = json_of(
        dir.path(),
        &["--fixture", path.to_str().unwrap(), "analytics"],
    );
    let from_demo = json_of(dir.path(), &["analytics"]);
    assert_eq!(from_file, from_demo);

    let dumped: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dumped["currentUser"], "u2");
}

#[test]
fn project_config_sets_user() {
    let dir = TempDir::new().unwrap();
    write_project_config(dir.path(), "[session]\nuser = \"u6\"\n");
    let json = json_of(dir.path(), &["menu"]);
    assert_eq!(json["user_name"], "Alex Morgan");
    assert_eq!(json["items"][0]["view"], "viewer");
}

#[test]
fn missing_fixture_file_is_e1002() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["--fixture", "nope.json", "--format", "text", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn completions_emit_a_script() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("td"));
}
