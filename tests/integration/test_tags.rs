//! Integration tests for `nova-release tags`

use crate::helpers::{TestWorkspace, run_nova_release, run_nova_release_raw, stdout};
use anyhow::Result;

fn tag_names(json: &serde_json::Value) -> Vec<String> {
  json
    .as_array()
    .map(|tags| tags.iter().filter_map(|t| t["tag"].as_str().map(String::from)).collect())
    .unwrap_or_default()
}

#[test]
fn test_tags_service_newest_first() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["tags", "snapshot.json", "-c", "orders!", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(tag_names(&json), vec!["v1.1.0", "v1.0.0"]);
  assert_eq!(json[0]["package"], "Orders");
  assert_eq!(json[0]["date"], "2024-03-05");
  assert_eq!(json[0]["url"], "https://github.com/Acme/Orders/releases/tag/v1.1.0");

  Ok(())
}

#[test]
fn test_tags_since() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(
    &ws.path,
    &["tags", "snapshot.json", "-c", "orders!", "--since", "2024-02-01", "--json"],
  )?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(tag_names(&json), vec!["v1.1.0"]);

  Ok(())
}

#[test]
fn test_tags_bad_since_date() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["tags", "snapshot.json", "-c", "orders!", "--since", "March"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_tags_package_exception() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["tags", "snapshot.json", "-c", "orders.client", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(tag_names(&json), vec!["contract-1.0.0", "client-1.0.0"]);

  ws.write_file(
    "release.toml",
    r#"
[[package_tags.exceptions]]
name = "Orders.Client"
tag_template = "client"
"#,
  )?;
  let output = run_nova_release(&ws.path, &["tags", "snapshot.json", "-c", "orders.client", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(tag_names(&json), vec!["client-1.0.0"]);

  Ok(())
}

#[test]
fn test_tags_component_without_tasks() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["tags", "snapshot.json", "-c", "billing"])?;
  assert!(stdout(&output).contains("No tags found for Billing"));

  Ok(())
}

#[test]
fn test_tags_table() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["tags", "snapshot.json", "-c", "orders!"])?;
  let text = stdout(&output);
  assert!(text.starts_with("DATE"));
  assert!(text.contains("2024-01-10   v1.0.0"));
  assert!(text.contains("Total: 2 tag(s)"));

  Ok(())
}
