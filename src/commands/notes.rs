use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::commands::CommandContext;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::model::component::Component;
use crate::model::release::Release;
use crate::notes::{build_release_title_md, parse_changelog_version, prepend_release_notes};
use crate::vcs::revision::next_version;

/// Options of the notes command
#[derive(Debug, Clone, Default)]
pub struct NotesArgs {
  /// Component lookup query; all components when absent
  pub component: Option<String>,
  pub from: Option<String>,
  pub to: Option<String>,
  /// Dry-run listing with deployment markers
  pub preview: bool,
  /// Changelog to prepend the component's notes to
  pub changelog: Option<PathBuf>,
}

/// Run the notes command
pub fn run_notes(ctx: &CommandContext, snapshot: &Path, args: NotesArgs) -> ReleaseResult<()> {
  let (_, release) = ctx.release(snapshot)?;

  if let Some(changelog) = &args.changelog {
    let query = args.component.as_deref().ok_or_else(|| {
      ReleaseError::with_help(
        "--changelog needs a component",
        "Pass --component <NAME> to choose whose notes go into the changelog",
      )
    })?;
    let component = release.require_component(query)?;
    return update_changelog(&release, component, changelog, &args);
  }

  let components: Vec<&Component> = match &args.component {
    Some(query) => vec![release.require_component(query)?],
    None => release.components().iter().collect(),
  };

  let mut printed = 0;
  for component in components {
    let notes = render(component, &args);
    if notes.is_empty() {
      debug!(component = component.name(), "no release notes for this repository host");
      continue;
    }
    if printed > 0 {
      println!();
    }
    println!("### {}\n", component.name());
    println!("{}", notes);
    printed += 1;
  }

  if printed == 0 {
    println!("No release notes for {}", release.title());
  }
  Ok(())
}

fn render(component: &Component, args: &NotesArgs) -> String {
  if args.preview {
    component.get_preview_notes()
  } else {
    component.get_release_notes(args.from.as_deref(), args.to.as_deref())
  }
}

/// Prepend a new changelog entry; its version follows the newest one in the file
fn update_changelog(release: &Release, component: &Component, path: &Path, args: &NotesArgs) -> ReleaseResult<()> {
  let notes = component.get_release_notes(args.from.as_deref(), args.to.as_deref());
  if notes.is_empty() {
    return Err(ReleaseError::invalid(format!(
      "Component {} has no release notes to add",
      component.name()
    )));
  }

  let existing = fs::read_to_string(path).with_context(|| format!("Failed to read changelog {}", path.display()))?;
  let current = parse_changelog_version(&existing)?;
  let version = next_version(&current, release.is_hotfix())?;

  let heading = build_release_title_md(&release.title(), &version.to_string(), Utc::now().date_naive())?;
  let entry = format!("{}\n\n{}", heading, notes);
  let updated = prepend_release_notes(&existing, &entry)?;

  fs::write(path, updated).with_context(|| format!("Failed to write changelog {}", path.display()))?;
  println!("✅ {} {} added to {}", component.name(), version, path.display());
  Ok(())
}
