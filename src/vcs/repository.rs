//! Code repository references attached to components
//!
//! Tracker components describe their repository in free text. Accepted forms:
//! - `https://github.com/<company>/<repo>` (scheme optional)
//! - `https://bitbucket.org/<workspace>/<repo>` (scheme optional)

use crate::core::error::{ReleaseError, ReleaseResult};
use serde::Serialize;
use std::fmt;

/// Which hosting provider a repository lives on
///
/// Decides the release-note layout and the URL conventions for tags and
/// comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
  /// Release notes with a header and a comparison link
  GitHub,
  /// Plain task bullet list
  Bitbucket,
  /// Anything else; produces no release notes
  Unknown,
}

impl HostKind {
  /// Classify a host name
  pub fn from_host(host: &str) -> Self {
    let host = host.to_lowercase();
    if host.contains("github") {
      HostKind::GitHub
    } else if host.contains("bitbucket") {
      HostKind::Bitbucket
    } else {
      HostKind::Unknown
    }
  }
}

impl fmt::Display for HostKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      HostKind::GitHub => "GitHub",
      HostKind::Bitbucket => "Bitbucket",
      HostKind::Unknown => "unknown",
    };
    f.write_str(name)
  }
}

/// Repository reference: host kind plus URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
  host: HostKind,
  url: String,
}

impl Repository {
  pub fn new(host: HostKind, url: impl Into<String>) -> Self {
    Self { host, url: url.into() }
  }

  pub fn host(&self) -> HostKind {
    self.host
  }

  pub fn url(&self) -> &str {
    &self.url
  }

  /// URL without one trailing slash and without a `.git` suffix
  pub fn sanitized_url(&self) -> String {
    sanitize_url(&self.url)
  }

  /// Parse a tracker component description into a repository reference
  ///
  /// Returns `None` for empty text, text that does not look like a URL, and
  /// hosts other than GitHub or Bitbucket.
  pub fn parse_description(description: &str) -> Option<Self> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
      return None;
    }

    let normalized = trimmed.to_lowercase();
    let normalized = if normalized.starts_with("http") {
      normalized
    } else {
      format!("http://{}", normalized)
    };

    let host = host_of(&normalized)?;
    match HostKind::from_host(host) {
      HostKind::Unknown => None,
      kind => Some(Self::new(kind, trimmed)),
    }
  }

  /// Web URL of a tag on the hosting provider
  pub fn tag_url(&self, tag_name: &str) -> ReleaseResult<String> {
    if self.url.trim().is_empty() {
      return Err(ReleaseError::missing("Repository URL"));
    }
    if tag_name.is_empty() {
      return Err(ReleaseError::missing("Tag name"));
    }

    let base = self.sanitized_url();
    match self.host {
      HostKind::GitHub => Ok(format!("{}/releases/tag/{}", base, tag_name)),
      HostKind::Bitbucket => Ok(format!("{}/src/{}", base, tag_name)),
      HostKind::Unknown => Err(ReleaseError::invalid(format!(
        "Unsupported repository host for {}",
        self.url
      ))),
    }
  }

  /// `<company>/<repo>` address accepted by the GitHub API client
  pub fn github_address(&self) -> String {
    let normalized = self.url.trim().to_lowercase();
    let without_scheme = normalized
      .strip_prefix("https://")
      .or_else(|| normalized.strip_prefix("http://"))
      .unwrap_or(&normalized);

    without_scheme.split('/').skip(1).collect::<Vec<_>>().join("/")
  }
}

/// Strip a single trailing `/`, then a `.git` suffix
pub fn sanitize_url(url: &str) -> String {
  let url = url.strip_suffix('/').unwrap_or(url);
  let url = url.strip_suffix(".git").unwrap_or(url);
  url.to_string()
}

/// Host part of an `http(s)://host/...` URL, if it looks like a real host
fn host_of(url: &str) -> Option<&str> {
  let (_, rest) = url.split_once("://")?;
  let host = rest.split(['/', '?', '#']).next()?;
  let host = host.rsplit('@').next()?;
  let host = host.split(':').next()?;

  let valid = !host.is_empty()
    && host.contains('.')
    && !host.starts_with('.')
    && !host.ends_with('.')
    && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
  valid.then_some(host)
}
