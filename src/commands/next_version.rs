use crate::core::error::ReleaseResult;
use crate::vcs::revision::{next_version, parse_revision};

/// Print the version that follows `version`
pub fn run_next_version(version: &str, hotfix: bool) -> ReleaseResult<()> {
  let current = parse_revision(version)?;
  println!("{}", next_version(&current, hotfix)?);
  Ok(())
}
