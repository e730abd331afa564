//! Revision comparison used to order tags and guard changelog ranges
//!
//! Revisions are tag-like strings (`nova-1.2.3`, `1.4`, `2`). They are
//! normalized, padded to `MAJOR.MINOR.PATCH` and compared as semver.

use crate::core::error::{ParseError, ReleaseError, ReleaseResult};
use semver::Version;
use std::cmp::Ordering;

/// Product prefix carried by service release tags
pub const PRODUCT_PREFIX: &str = "nova-";

/// Strip the product prefix if present
pub fn normalize(revision: &str) -> &str {
  revision.strip_prefix(PRODUCT_PREFIX).unwrap_or(revision)
}

/// Parse a revision as a version, tolerating missing minor/patch parts
///
/// `1` becomes `1.0.0`, `1.2` becomes `1.2.0`. A leading `v` is accepted.
/// Pre-release and build suffixes follow semver rules.
pub fn parse_revision(revision: &str) -> ReleaseResult<Version> {
  let normalized = normalize(revision.trim());
  let bare = normalized
    .strip_prefix('v')
    .or_else(|| normalized.strip_prefix('V'))
    .unwrap_or(normalized);

  let core_end = bare.find(['-', '+']).unwrap_or(bare.len());
  let (core, suffix) = bare.split_at(core_end);
  let parts: Vec<&str> = core.split('.').collect();
  if parts.len() > 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
    return Err(ReleaseError::Parse(ParseError::Malformed {
      input: revision.to_string(),
    }));
  }

  let mut padded = parts.join(".");
  for _ in parts.len()..3 {
    padded.push_str(".0");
  }
  padded.push_str(suffix);

  Version::parse(&padded).map_err(|source| {
    ReleaseError::Parse(ParseError::Version {
      input: revision.to_string(),
      source,
    })
  })
}

/// Whether `a` is strictly older than `b`
///
/// Absent revisions are a validation error; unparseable ones a parse error.
pub fn compare_revisions(a: Option<&str>, b: Option<&str>) -> ReleaseResult<bool> {
  let a = a.ok_or_else(|| ReleaseError::missing("Revision to compare"))?;
  let b = b.ok_or_else(|| ReleaseError::missing("Revision to compare with"))?;

  let a = parse_revision(a)?;
  let b = parse_revision(b)?;
  Ok(a.cmp_precedence(&b) == Ordering::Less)
}

/// Comparison URL for a forward range, or an empty string
///
/// Empty when any input is missing or blank, when `from >= to`, or when either
/// revision fails to parse. The repository URL loses one trailing slash.
pub fn get_comparison_url(revision_from: Option<&str>, revision_to: Option<&str>, repo_url: Option<&str>) -> String {
  let (Some(from), Some(to), Some(url)) = (revision_from, revision_to, repo_url) else {
    return String::new();
  };
  let (from, to, url) = (from.trim(), to.trim(), url.trim());
  if from.is_empty() || to.is_empty() || url.is_empty() {
    return String::new();
  }

  match compare_revisions(Some(from), Some(to)) {
    Ok(true) => {}
    Ok(false) | Err(_) => return String::new(),
  }

  let sanitized = url.strip_suffix('/').unwrap_or(url);
  format!("{}/compare/{}...{}", sanitized, from, to)
}

/// Version that follows `version`
///
/// A regular delivery bumps the minor part; a hotfix bumps the patch part.
pub fn next_version(version: &Version, is_hotfix: bool) -> ReleaseResult<Version> {
  let bumped = if is_hotfix {
    version
      .patch
      .checked_add(1)
      .map(|patch| Version::new(version.major, version.minor, patch))
  } else {
    version
      .minor
      .checked_add(1)
      .map(|minor| Version::new(version.major, minor, 0))
  };
  bumped.ok_or_else(|| {
    ReleaseError::Parse(ParseError::Malformed {
      input: version.to_string(),
    })
  })
}
