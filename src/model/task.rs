//! Tracker issue projection and its release-note line

use super::status::Status;
use crate::core::error::{ReleaseError, ReleaseResult};
use serde::Serialize;

/// Marker appended to the task key in preview listings when manual deployment steps exist
pub const DEPLOYMENT_ASTERISK: &str = "*";

/// One tracker issue assigned to exactly one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
  name: String,
  status: Status,
  summary: String,
  deployment: Option<String>,
}

impl Task {
  /// Create a task with an empty summary and no deployment note
  pub fn new(name: impl Into<String>, status: Status) -> ReleaseResult<Self> {
    let name = name.into();
    if name.is_empty() {
      return Err(ReleaseError::missing("Task name"));
    }
    Ok(Self {
      name,
      status,
      summary: String::new(),
      deployment: None,
    })
  }

  /// Set the free-text summary
  pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
    self.summary = summary.into();
    self
  }

  /// Set the deployment instructions
  pub fn with_deployment(mut self, deployment: Option<String>) -> Self {
    self.deployment = deployment;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn summary(&self) -> &str {
    &self.summary
  }

  pub fn deployment(&self) -> Option<&str> {
    self.deployment.as_deref()
  }

  /// Whether the task carries manual deployment steps
  pub fn requires_deployment(&self) -> bool {
    self.deployment.as_deref().is_some_and(|d| !d.is_empty())
  }

  /// Render the task as a release-note line: `KEY[*]: Summary.`
  ///
  /// The asterisk only shows up in `preview` mode, and only for tasks with a
  /// deployment note. A summary made only of `[tag]` prefixes renders as
  /// `KEY: .`.
  pub fn get_release_notes(&self, preview: bool) -> String {
    let key = self.name.trim().to_uppercase();
    let summary = normalize_summary(&self.summary);
    let ending = if summary.ends_with('.') { "" } else { "." };
    let mark = if preview && self.requires_deployment() {
      DEPLOYMENT_ASTERISK
    } else {
      ""
    };

    format!("{}{}: {}{}", key, mark, summary, ending)
  }
}

/// Strip leading `[...]` chunks, one trailing period, and capitalize
fn normalize_summary(summary: &str) -> String {
  let mut rest = summary.trim_start();
  while let Some(inside) = rest.strip_prefix('[') {
    match inside.find(']') {
      Some(end) => rest = inside[end + 1..].trim_start(),
      None => break,
    }
  }

  let trimmed = rest.trim();
  let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed).trim();
  capitalize(trimmed)
}

/// Upper-case the first character, leave the rest untouched
fn capitalize(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
