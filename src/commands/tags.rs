use std::path::Path;

use chrono::NaiveDate;

use crate::commands::CommandContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::model::component::Component;
use crate::model::release::find_component;
use crate::tracker::parse_component;
use crate::vcs::tags::TagCollection;

/// Run the tags command
///
/// Looks the component up among all snapshot components, not only those with
/// tasks in this release.
pub fn run_tags(
  ctx: &CommandContext,
  snapshot: &Path,
  component: &str,
  since: Option<String>,
  json: bool,
) -> ReleaseResult<()> {
  let snapshot = ctx.snapshot(snapshot)?;
  let components = snapshot
    .components
    .iter()
    .map(parse_component)
    .filter(|c| !c.as_ref().is_ok_and(Component::is_placeholder))
    .collect::<ReleaseResult<Vec<_>>>()?;

  let component = find_component(&components, component)?
    .ok_or_else(|| ReleaseError::invalid(format!("No component matches '{}'", component)))?;

  let mut tags = TagCollection::from_tags(component, snapshot.tags_for(component.name()))
    .apply_exception(&ctx.config.package_tags);
  if let Some(since) = since {
    let date = NaiveDate::parse_from_str(&since, "%Y-%m-%d")?;
    tags = tags.since(date);
  }
  let infos = tags.sorted_by_date().tag_infos()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&infos)?);
    return Ok(());
  }

  if infos.is_empty() {
    println!("No tags found for {}", component.name());
    return Ok(());
  }

  println!("{:<12} {:<30} URL", "DATE", "TAG");
  println!("{:-<80}", "");
  for info in &infos {
    println!("{:<12} {:<30} {}", info.date, info.tag, info.url);
  }
  println!("\nTotal: {} tag(s)", infos.len());
  Ok(())
}
