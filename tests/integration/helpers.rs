//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Snapshot of release 2.1 / delivery 4
///
/// Orders is ready for release, Orders.Client is done, Billing has no tasks
/// and the n/a placeholder collects an unrelated issue.
pub const SNAPSHOT: &str = r#"{
  "project": "NOVA",
  "version": "2.1",
  "delivery": "4",
  "components": [
    { "name": "Orders", "description": "https://github.com/Acme/Orders" },
    { "name": "Orders.Client", "description": "bitbucket.org/acme/orders-client" },
    { "name": "Billing", "description": "https://github.com/acme/billing" },
    { "name": "N/A" }
  ],
  "issues": [
    {
      "key": "nova-1",
      "status": "Selected For Release",
      "summary": "[api] add paging",
      "deployment": "restart workers",
      "components": ["Orders"]
    },
    { "key": "NOVA-2", "status": "Done", "summary": "fix totals.", "components": ["Orders"] },
    { "key": "NOVA-3", "status": "Done", "summary": "publish client", "components": ["Orders.Client"] },
    { "key": "NOVA-4", "status": "Open", "summary": "investigate", "components": ["n/a"] }
  ],
  "tags": {
    "Orders": [
      { "name": "v1.0.0", "committed_at": "2024-01-10T09:00:00Z" },
      { "name": "v1.1.0", "committed_at": "2024-03-05T09:00:00Z" },
      { "name": "client-1.0.0", "committed_at": "2024-03-06T09:00:00Z" }
    ],
    "Orders.Client": [
      { "name": "client-1.0.0", "committed_at": "2024-02-01T09:00:00Z" },
      { "name": "contract-1.0.0", "committed_at": "2024-02-02T09:00:00Z" }
    ]
  }
}"#;

/// Scratch directory holding a snapshot and optional config/changelog files
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a workspace with [`SNAPSHOT`] written to `snapshot.json`
  pub fn new() -> Result<Self> {
    Self::with_snapshot(SNAPSHOT)
  }

  pub fn with_snapshot(snapshot: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::write(path.join("snapshot.json"), snapshot)?;
    Ok(Self { _root: root, path })
  }

  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content).with_context(|| format!("Failed to write {}", name))
  }

  pub fn read_file(&self, name: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(name))?)
  }
}

/// Run nova-release and return its output whatever the exit status
pub fn run_nova_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_nova-release");

  Command::new(bin)
    .current_dir(cwd)
    .env_remove("NOVA_RELEASE_LOG")
    .args(args)
    .output()
    .context("Failed to run nova-release")
}

/// Run nova-release, failing the test unless it succeeds
pub fn run_nova_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_nova_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "nova-release command failed: nova-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
