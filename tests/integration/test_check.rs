//! Integration tests for `nova-release check`, `next-version` and `artifacts`

use crate::helpers::{SNAPSHOT, TestWorkspace, run_nova_release, run_nova_release_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_check_release_not_done() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["check", "snapshot.json"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("cannot be marked released (status READY_FOR_RELEASE)"));

  Ok(())
}

#[test]
fn test_check_release_done() -> Result<()> {
  let ws = TestWorkspace::with_snapshot(&SNAPSHOT.replace("Selected For Release", "Done"))?;

  let output = run_nova_release(&ws.path, &["check", "snapshot.json"])?;
  assert!(stdout(&output).contains("Nova 2.1. Delivery 4 can be marked released"));

  Ok(())
}

#[test]
fn test_check_component_ready() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["check", "snapshot.json", "-c", "orders!"])?;
  assert!(stdout(&output).contains("Orders is ready for release"));

  Ok(())
}

#[test]
fn test_check_component_already_released() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["check", "snapshot.json", "-c", "orders.client"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("[Orders.Client] is already released"));

  Ok(())
}

#[test]
fn test_check_component_not_in_release() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["check", "snapshot.json", "-c", "billing"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("is not part of Nova 2.1. Delivery 4"));

  Ok(())
}

#[test]
fn test_next_version() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["next-version", "1.4"])?;
  assert_eq!(stdout(&output), "1.5.0\n");

  let output = run_nova_release(&ws.path, &["next-version", "nova-1.4.2", "--hotfix"])?;
  assert_eq!(stdout(&output), "1.4.3\n");

  let output = run_nova_release_raw(&ws.path, &["next-version", "latest"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid version 'latest'"));

  let output = run_nova_release_raw(&ws.path, &["next-version", "1.0.18446744073709551615", "--hotfix"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid version '1.0.18446744073709551615'"));

  Ok(())
}

#[test]
fn test_artifacts_folder() -> Result<()> {
  let ws = TestWorkspace::with_snapshot(&SNAPSHOT.replace("\"delivery\": \"4\",", "\"delivery\": \"4\", \"hotfix\": \"2\","))?;
  ws.write_file(
    "release.toml",
    "[release]\nartifacts_folder_template = \"{nova} {delivery}{hotfix}\"\n",
  )?;

  let output = run_nova_release(&ws.path, &["artifacts", "snapshot.json"])?;
  assert_eq!(stdout(&output), "Nova 2.1. Delivery 4. Hotfix 2\n");

  Ok(())
}

#[test]
fn test_artifacts_without_template() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["artifacts", "snapshot.json"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("artifacts_folder_template is not specified"));

  Ok(())
}
