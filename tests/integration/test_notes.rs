//! Integration tests for `nova-release notes`

use crate::helpers::{TestWorkspace, run_nova_release, run_nova_release_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_notes_github_with_changelog_link() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(
    &ws.path,
    &[
      "notes",
      "snapshot.json",
      "--component",
      "orders!",
      "--from",
      "nova-1.0.0",
      "--to",
      "nova-1.1.0",
    ],
  )?;

  let expected = "### Orders\n\n\
    ## What's changed\n\n\
    * NOVA-1: Add paging.\n\
    * NOVA-2: Fix totals.\n\n\
    **Full Changelog**: https://github.com/acme/orders/compare/nova-1.0.0...nova-1.1.0\n";
  assert_eq!(stdout(&output), expected);

  Ok(())
}

#[test]
fn test_notes_backwards_range_has_no_link() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(
    &ws.path,
    &["notes", "snapshot.json", "-c", "orders!", "--from", "1.1", "--to", "1.0"],
  )?;
  let text = stdout(&output);
  assert!(text.contains("* NOVA-2: Fix totals."));
  assert!(!text.contains("Full Changelog"));

  Ok(())
}

#[test]
fn test_notes_all_components() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["notes", "snapshot.json"])?;
  let text = stdout(&output);
  assert!(text.contains("### Orders\n"));
  assert!(text.contains("### Orders.Client\n\n* NOVA-3: Publish client.\n"));
  assert!(!text.contains("Billing"));
  assert!(!text.contains("NOVA-4"));

  Ok(())
}

#[test]
fn test_notes_preview_marks_deployments() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release(&ws.path, &["notes", "snapshot.json", "-c", "orders!", "--preview"])?;
  assert_eq!(stdout(&output), "### Orders\n\nNOVA-1*: Add paging.\nNOVA-2: Fix totals.\n");

  Ok(())
}

#[test]
fn test_notes_ambiguous_component() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_nova_release_raw(&ws.path, &["notes", "snapshot.json", "-c", "orders"])?;
  assert_eq!(output.status.code(), Some(1));
  let err = stderr(&output);
  assert!(err.contains("More than one component matches 'orders'"), "{}", err);
  assert!(err.contains("'orders!'"), "{}", err);

  Ok(())
}

#[test]
fn test_notes_prepend_to_changelog() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file(
    "CHANGELOG.md",
    "## 1.2.0 - Nova 2.0. Delivery 3 (January 10, 2024)\n\n* NOVA-0: Old.\n",
  )?;

  let output = run_nova_release(
    &ws.path,
    &["notes", "snapshot.json", "-c", "orders!", "--changelog", "CHANGELOG.md"],
  )?;
  assert!(stdout(&output).contains("Orders 1.3.0 added to CHANGELOG.md"));

  let changelog = ws.read_file("CHANGELOG.md")?;
  assert!(changelog.starts_with("## 1.3.0 - Nova 2.1. Delivery 4 ("), "{}", changelog);
  assert!(changelog.contains(")\n\n## What's changed\n\n* NOVA-1: Add paging.\n"));
  assert!(changelog.ends_with("\n\n## 1.2.0 - Nova 2.0. Delivery 3 (January 10, 2024)\n\n* NOVA-0: Old.\n"));

  Ok(())
}

#[test]
fn test_notes_changelog_without_version_fails() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("CHANGELOG.md", "# Changelog\n")?;

  let output = run_nova_release_raw(
    &ws.path,
    &["notes", "snapshot.json", "-c", "orders!", "--changelog", "CHANGELOG.md"],
  )?;
  assert_eq!(output.status.code(), Some(3));
  assert_eq!(ws.read_file("CHANGELOG.md")?, "# Changelog\n");

  Ok(())
}
