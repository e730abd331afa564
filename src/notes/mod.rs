//! Changelog text helpers
//!
//! Changelogs keep one `## <version> - <release title> (<date>)` heading per
//! release, newest first. These helpers read the latest version back out of
//! such a file and build the heading plus the text for the next entry.

use crate::core::error::{ReleaseError, ReleaseResult};
use crate::vcs::revision::parse_revision;
use chrono::NaiveDate;
use semver::Version;

/// Version from a changelog heading such as `## 1.0.0 Delivery 1 (January 1, 2019)`
///
/// The line must start with `##` and mention a delivery. The second word is
/// the version and may only contain digits and dots.
pub fn extract_component_version(line: &str) -> Option<String> {
  let normalized = line.to_lowercase();
  if !normalized.starts_with("##") || !normalized.contains("delivery") {
    return None;
  }

  let candidate = normalized.split_whitespace().nth(1)?;
  let looks_like_version =
    candidate.chars().any(|c| c.is_ascii_digit()) && candidate.chars().all(|c| c.is_ascii_digit() || c == '.');
  looks_like_version.then(|| candidate.to_string())
}

/// First (newest) release version found in changelog text
pub fn latest_changelog_version(changelog: &str) -> Option<String> {
  changelog.lines().find_map(extract_component_version)
}

/// Latest changelog version, parsed; absence is a validation error
pub fn parse_changelog_version(changelog: &str) -> ReleaseResult<Version> {
  let version = latest_changelog_version(changelog)
    .ok_or_else(|| ReleaseError::invalid("Could not extract a release version from the changelog"))?;
  parse_revision(&version)
}

/// Markdown heading for a changelog entry: `## <version> - <title> (<Month DD, YYYY>)`
pub fn build_release_title_md(release_title: &str, version: &str, date: NaiveDate) -> ReleaseResult<String> {
  let release_title = release_title.trim();
  if release_title.is_empty() {
    return Err(ReleaseError::missing("Release title"));
  }
  let version = version.trim();
  if version.is_empty() {
    return Err(ReleaseError::missing("Version"));
  }

  Ok(format!(
    "## {} - {} ({})",
    version,
    release_title,
    date.format("%B %d, %Y")
  ))
}

/// Put new release notes in front of the existing changelog
pub fn prepend_release_notes(existing: &str, release_notes: &str) -> ReleaseResult<String> {
  if release_notes.is_empty() {
    return Err(ReleaseError::missing("Release notes"));
  }
  Ok(format!("{}\n\n{}", release_notes, existing))
}
