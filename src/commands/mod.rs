//! CLI commands for nova-release
//!
//! Every command works on an offline release snapshot: a JSON export of the
//! tracker issues, tracker components and repository tags of one release.
//!
//! ## Inspection
//! - **status**: Component table and overall release status
//! - **notes**: Release notes per component, optionally prepended to a changelog
//! - **tags**: Release tags of a component, newest first
//! - **artifacts**: Folder name for the release artifacts
//!
//! ## Gating
//! - **check**: Fail unless the release (or one component) can be released
//! - **next-version**: Version that follows a given one
//!
//! All snapshot commands accept `&CommandContext` so config is loaded once.

pub mod artifacts;
pub mod check;
pub mod next_version;
pub mod notes;
pub mod status;
pub mod tags;

pub use artifacts::run_artifacts;
pub use check::run_check;
pub use next_version::run_next_version;
pub use notes::{NotesArgs, run_notes};
pub use status::run_status;
pub use tags::run_tags;

use crate::core::config::NovaConfig;
use crate::core::error::ReleaseResult;
use crate::model::release::Release;
use crate::tracker::ReleaseSnapshot;
use std::path::Path;
use tracing::debug;

/// State shared by all snapshot commands
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
  pub config: NovaConfig,
}

impl CommandContext {
  /// Load config from `--config`, or by searching `cwd`
  pub fn load(config_path: Option<&Path>, cwd: &Path) -> ReleaseResult<Self> {
    let config = NovaConfig::resolve(config_path, cwd)?;
    debug!(label = %config.release.project_label, "configuration loaded");
    Ok(Self { config })
  }

  pub fn snapshot(&self, path: &Path) -> ReleaseResult<ReleaseSnapshot> {
    ReleaseSnapshot::load(path)
  }

  /// Load a snapshot and compose its release in one go
  pub fn release(&self, path: &Path) -> ReleaseResult<(ReleaseSnapshot, Release)> {
    let snapshot = self.snapshot(path)?;
    let release = snapshot.compose(&self.config)?;
    Ok((snapshot, release))
  }
}
