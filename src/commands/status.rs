use std::path::Path;

use crate::commands::CommandContext;
use crate::core::error::ReleaseResult;

/// Run the status command
pub fn run_status(ctx: &CommandContext, snapshot: &Path, json: bool) -> ReleaseResult<()> {
  let (_, release) = ctx.release(snapshot)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&release.summary())?);
  } else {
    println!("{}", release.describe_status());
  }

  Ok(())
}
