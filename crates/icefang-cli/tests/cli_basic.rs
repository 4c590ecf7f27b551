//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_icefang"))
        .args(args)
        .env("ICEFANG_DATA_DIR", data_dir)
        .env_remove("ICEFANG_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn create_event(data_dir: &Path, title: &str, date: &str, start: &str, end: Option<&str>) -> String {
    let mut args = vec!["event", "create", title, "--date", date, "--start", start];
    if let Some(end) = end {
        args.extend(["--end", end]);
    }
    let event = run_json(data_dir, &args);
    event["id"].as_str().unwrap().to_string()
}

#[test]
fn test_event_create_and_list() {
    let dir = TempDir::new().unwrap();
    let id = create_event(dir.path(), "Standup", "2025-10-14", "09:00", None);

    let events = run_json(dir.path(), &["event", "list"]);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], id.as_str());
    assert_eq!(events[0]["owner_id"], "local");

    let other = run_json(dir.path(), &["--owner", "bob", "event", "list"]);
    assert!(other.as_array().unwrap().is_empty());
}

#[test]
fn test_event_create_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["event", "create", "Broken", "--date", "2025-10-14", "--start", "9am"],
    );
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "stderr: {stderr}");
}

#[test]
fn test_event_update_and_delete() {
    let dir = TempDir::new().unwrap();
    let id = create_event(dir.path(), "Review", "2025-10-14", "10:00", Some("11:00"));

    let updated = run_json(dir.path(), &["event", "update", &id, "--title", "Design review"]);
    assert_eq!(updated["title"], "Design review");
    assert_eq!(updated["end_time"], "11:00");

    let (stdout, _, code) = run_cli(dir.path(), &["event", "delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Event deleted"));

    let (_, stderr, code) = run_cli(dir.path(), &["event", "get", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_calendar_week_json_packs_overlaps() {
    let dir = TempDir::new().unwrap();
    create_event(dir.path(), "A", "2025-10-14", "08:00", Some("09:00"));
    create_event(dir.path(), "B", "2025-10-14", "08:30", Some("09:30"));
    create_event(dir.path(), "C", "2025-10-14", "10:00", Some("11:00"));

    let week = run_json(dir.path(), &["calendar", "week", "--date", "2025-10-14", "--json"]);
    let days = week["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    let tuesday = days.iter().find(|d| d["date"] == "2025-10-14").unwrap();
    let counts: Vec<_> = tuesday["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["column_count"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, [2, 2, 1]);
}

#[test]
fn test_calendar_month_text_from_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("events.json");
    let records: Vec<Value> = (0..5)
        .map(|i| {
            serde_json::json!({
                "_id": format!("e{i}"),
                "name": format!("Meeting {i}"),
                "date": "2025-10-15",
                "startTime": "09:00",
            })
        })
        .chain([serde_json::json!({ "date": "2025-10-15" })])
        .collect();
    std::fs::write(&input, serde_json::to_string(&records).unwrap()).unwrap();

    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["calendar", "month", "--date", "2025-10-01", "--input", input.to_str().unwrap()],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.starts_with("October 2025"));
    assert!(stdout.contains("Meeting 0"));
    assert!(stdout.contains("+2 more"));
    assert!(stderr.contains("skipping record"));
}

#[test]
fn test_task_lifecycle() {
    let dir = TempDir::new().unwrap();
    let task = run_json(
        dir.path(),
        &["task", "create", "Write report", "--priority", "high", "--category", "work", "--due", "2025-10-20"],
    );
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["priority"], "high");
    assert_eq!(task["completed"], false);

    let done = run_json(dir.path(), &["task", "complete", &id]);
    assert_eq!(done["completed"], true);
    assert!(done["completed_at"].is_string());

    let ongoing = run_json(dir.path(), &["task", "list", "--status", "ongoing"]);
    assert!(ongoing.as_array().unwrap().is_empty());
    let completed = run_json(dir.path(), &["task", "list", "--status", "completed", "--category", "work"]);
    assert_eq!(completed.as_array().unwrap().len(), 1);

    let reopened = run_json(dir.path(), &["task", "reopen", &id]);
    assert_eq!(reopened["completed"], false);
    assert!(reopened.get("completed_at").is_none());
}

#[test]
fn test_task_update_clear_due() {
    let dir = TempDir::new().unwrap();
    let task = run_json(dir.path(), &["task", "create", "Renew passport", "--due", "2025-12-01"]);
    let id = task["id"].as_str().unwrap().to_string();

    let updated = run_json(dir.path(), &["task", "update", &id, "--clear-due"]);
    assert!(updated.get("due_date").is_none());

    let (_, _, code) = run_cli(dir.path(), &["task", "update", &id, "--clear-due", "--due", "2025-12-02"]);
    assert_ne!(code, 0);
}

#[test]
fn test_task_list_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["task", "list", "--status", "someday"]);
    assert_ne!(code, 0);
}

#[test]
fn test_analytics_and_dashboard_json() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["task", "create", "Plan trip", "--due", "2099-01-01"]);
    create_event(dir.path(), "Launch", "2099-01-01", "09:00", None);

    let recap = run_json(dir.path(), &["analytics", "recap", "--json"]);
    assert_eq!(recap["tasks_open"], 1);

    let completion = run_json(dir.path(), &["analytics", "completion", "--period", "monthly", "--date", "2099-01-01", "--json"]);
    assert_eq!(completion["series"][0]["due"], 1);

    let heatmap = run_json(dir.path(), &["analytics", "heatmap", "--from", "2025-10-01", "--to", "2025-10-07", "--json"]);
    assert_eq!(heatmap.as_array().unwrap().len(), 7);

    let board = run_json(dir.path(), &["dashboard", "--json"]);
    assert_eq!(board["upcoming_events"][0]["title"], "Launch");
    assert_eq!(board["upcoming_tasks"][0]["title"], "Plan trip");
}

#[test]
fn test_config_get_set_reset() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "calendar.max_visible_per_day"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "calendar.max_visible_per_day", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "calendar.max_visible_per_day"]);
    assert_eq!(stdout.trim(), "5");

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "calendar.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let config = run_json(dir.path(), &["config", "list"]);
    assert_eq!(config["calendar"]["max_visible_per_day"], 3);
    assert_eq!(config["user"]["owner_id"], "local");
}
