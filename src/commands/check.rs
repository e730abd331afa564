use std::path::Path;

use crate::commands::CommandContext;
use crate::core::error::{ReleaseError, ReleaseResult, ValidationError};

/// Run the release gate
///
/// Without a component the whole release must be `DONE` before it can be
/// marked released. With one, that component must be ready to tag.
pub fn run_check(ctx: &CommandContext, snapshot: &Path, component: Option<String>) -> ReleaseResult<()> {
  let (_, release) = ctx.release(snapshot)?;

  match component {
    Some(query) => {
      let component = release.require_component(&query)?;
      component.ensure_releasable()?;
      println!("✅ {} is ready for release", component.name());
    }
    None => {
      if !release.can_release_version() {
        return Err(ReleaseError::Validation(ValidationError::NotReleasable {
          name: release.title(),
          reason: format!("cannot be marked released (status {})", release.status()),
        }));
      }
      println!("✅ {} can be marked released", release.title());
    }
  }

  Ok(())
}
