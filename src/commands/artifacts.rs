use std::path::Path;

use crate::commands::CommandContext;
use crate::core::error::ReleaseResult;

/// Print the artifacts folder name for the snapshot's release
pub fn run_artifacts(ctx: &CommandContext, snapshot: &Path) -> ReleaseResult<()> {
  let snapshot = ctx.snapshot(snapshot)?;
  let folder = ctx.config.release.artifacts_folder_path(
    &snapshot.version,
    &snapshot.delivery,
    snapshot.hotfix.as_deref(),
  )?;
  println!("{}", folder);
  Ok(())
}
