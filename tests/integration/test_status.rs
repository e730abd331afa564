//! Integration tests for `nova-release status`

use crate::helpers::{TestWorkspace, run_nova_release, run_nova_release_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_status_table() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["status", "snapshot.json"])?;
  let expected = [
    "Nova 2.1. Delivery 4",
    "********************",
    "Orders        | READY_FOR_RELEASE |   2 tasks",
    "Orders.Client | DONE              |   1 tasks",
    "********************",
    "Total: 2 component(s)",
    "Total: 3 task(s)",
    "Status: READY_FOR_RELEASE",
  ]
  .join("\n");
  assert_eq!(stdout(&output).trim_end(), expected);

  Ok(())
}

#[test]
fn test_status_json() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["status", "snapshot.json", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["title"], "Nova 2.1. Delivery 4");
  assert_eq!(json["status"], "READY_FOR_RELEASE");
  assert_eq!(json["can_release"], false);
  assert_eq!(json["task_count"], 3);
  assert_eq!(json["components"].as_array().map(Vec::len), Some(2));
  assert_eq!(json["components"][1]["type"], "PACKAGE");

  Ok(())
}

#[test]
fn test_status_uses_config() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file(
    "release.toml",
    r#"
[release]
project_label = "Nova Cloud"

[tracker.status_labels]
"Selected For Release" = "DONE"
"#,
  )?;

  let output = run_nova_release(&ws.path, &["status", "snapshot.json", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(json["title"], "Nova Cloud 2.1. Delivery 4");
  assert_eq!(json["status"], "DONE");
  assert_eq!(json["can_release"], true);

  Ok(())
}

#[test]
fn test_status_unknown_label_is_undefined() -> Result<()> {
  let snapshot = crate::helpers::SNAPSHOT.replace("\"Open\"", "\"Blocked\"").replace("[\"n/a\"]", "[\"Billing\"]");
  let ws = TestWorkspace::with_snapshot(&snapshot)?;

  let output = run_nova_release(&ws.path, &["status", "snapshot.json"])?;
  let text = stdout(&output);
  assert!(text.contains("Billing       | UNDEFINED         |   1 tasks"), "{}", text);
  assert!(text.ends_with("Status: UNDEFINED\n"), "{}", text);
  assert!(stderr(&output).contains("unknown tracker status label"));

  Ok(())
}

#[test]
fn test_status_missing_explicit_config() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["--config", "missing.toml", "status", "snapshot.json"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Config file not found"));

  Ok(())
}

#[test]
fn test_status_missing_snapshot() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["status", "nope.json"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Failed to read snapshot"));

  Ok(())
}
