//! Issue-tracker boundary
//!
//! The tracker collaborator hands over issues and components as plain data.
//! This module turns them into [`Task`]s and [`Component`]s and composes a
//! [`Release`] from them. Nothing here talks to the tracker itself.

use crate::core::config::NovaConfig;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt, ValidationError};
use crate::model::component::Component;
use crate::model::release::Release;
use crate::model::status::{Status, StatusMapping};
use crate::model::task::Task;
use crate::vcs::repository::Repository;
use crate::vcs::tags::Tag;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Issue as exported by the tracker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawIssue {
  pub key: String,
  /// Workflow label, e.g. "Selected For Release"
  pub status: String,
  #[serde(default)]
  pub summary: String,
  /// Manual deployment instructions, when the issue has any
  #[serde(default)]
  pub deployment: Option<String>,
  /// Names of the tracker components the issue is filed under
  #[serde(default)]
  pub components: Vec<String>,
}

/// Component as exported by the tracker; the description holds the repository URL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawComponent {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
}

/// Which release to compose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
  pub project: String,
  pub version: String,
  pub delivery: String,
  pub hotfix: Option<String>,
  pub label: String,
}

/// Convert a tracker issue into a task
///
/// The issue must have a key and exactly one component. Unknown workflow
/// labels become `UNDEFINED` so the release status surfaces them.
pub fn parse_issue(raw: &RawIssue, mapping: &StatusMapping) -> ReleaseResult<Task> {
  if raw.key.trim().is_empty() {
    return Err(ReleaseError::missing("Issue key"));
  }
  match raw.components.len() {
    0 => return Err(ReleaseError::invalid(format!("Issue [{}] has no component", raw.key))),
    1 => {}
    _ => {
      return Err(ReleaseError::invalid(format!(
        "Issue [{}] has more than one component",
        raw.key
      )));
    }
  }

  let status = mapping.map(&raw.status);
  if status == Status::Undefined {
    warn!(issue = %raw.key, label = %raw.status, "unknown tracker status label");
  }

  let deployment = raw.deployment.clone().filter(|d| !d.trim().is_empty());
  Ok(
    Task::new(raw.key.clone(), status)?
      .with_summary(raw.summary.clone())
      .with_deployment(deployment),
  )
}

/// Convert a tracker component into a model component
///
/// Placeholder names produce the placeholder component. Real components need
/// a description naming a GitHub or Bitbucket repository.
pub fn parse_component(raw: &RawComponent) -> ReleaseResult<Component> {
  if raw.name.trim().is_empty() {
    return Err(ReleaseError::missing("Component name"));
  }
  if let Some(placeholder) = Component::parse_placeholder(&raw.name) {
    return Ok(placeholder);
  }

  let description = raw
    .description
    .as_deref()
    .filter(|d| !d.trim().is_empty())
    .ok_or_else(|| ReleaseError::missing(format!("Description of component [{}]", raw.name)))?;

  let repository = Repository::parse_description(description).ok_or_else(|| {
    ReleaseError::Validation(ValidationError::Invalid {
      message: format!("Component [{}] has invalid description", raw.name),
      help: Some(
        "Expected one of: http(s)://github.com/<company>/<repo>, http(s)://bitbucket.org/<workspace>/<repo>"
          .to_string(),
      ),
    })
  })?;

  Component::new(raw.name.clone(), Some(repository))
}

/// Whether the issue's first component is `component_name`, ignoring case and padding
pub fn issue_belongs_to(raw: &RawIssue, component_name: &str) -> ReleaseResult<bool> {
  let first = raw
    .components
    .first()
    .ok_or_else(|| ReleaseError::invalid(format!("Issue [{}] has no component assigned", raw.key)))?;

  Ok(first.trim().to_lowercase() == component_name.trim().to_lowercase())
}

/// Build a release from tracker data
///
/// Every component is parsed and receives the tasks of the issues filed under
/// it. Components without tasks, and placeholders, stay out of the release.
pub fn compose_release(
  request: &ReleaseRequest,
  raw_components: &[RawComponent],
  raw_issues: &[RawIssue],
  mapping: &StatusMapping,
) -> ReleaseResult<Release> {
  let mut release = Release::new(request.project.clone(), request.version.clone(), request.delivery.clone())
    .with_label(request.label.clone())
    .with_hotfix(request.hotfix.clone());

  let mut claimed = vec![false; raw_issues.len()];

  for raw in raw_components {
    let mut component = parse_component(raw)?;

    let mut tasks = Vec::new();
    for (i, issue) in raw_issues.iter().enumerate() {
      if issue_belongs_to(issue, &raw.name)? {
        claimed[i] = true;
        if !component.is_placeholder() {
          tasks.push(parse_issue(issue, mapping)?);
        }
      }
    }

    if component.is_placeholder() {
      debug!(component = %raw.name, "placeholder component kept out of release");
      continue;
    }
    if tasks.is_empty() {
      debug!(component = %raw.name, "component has no tasks in this release");
      continue;
    }

    component.add_tasks(tasks);
    release.add_component(component);
  }

  for (issue, _) in raw_issues.iter().zip(&claimed).filter(|(_, claimed)| !**claimed) {
    debug!(issue = %issue.key, component = ?issue.components.first(), "issue matches no known component");
  }

  Ok(release)
}

/// Offline export of everything needed to compose a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSnapshot {
  pub project: String,
  pub version: String,
  pub delivery: String,
  #[serde(default)]
  pub hotfix: Option<String>,
  #[serde(default)]
  pub components: Vec<RawComponent>,
  #[serde(default)]
  pub issues: Vec<RawIssue>,
  /// Repository tags per component name, iterated in key order
  #[serde(default)]
  pub tags: BTreeMap<String, Vec<Tag>>,
}

impl ReleaseSnapshot {
  /// Read a JSON snapshot from disk
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    Self::from_json(&content).with_context(|| format!("Failed to parse snapshot from {}", path.display()))
  }

  pub fn from_json(content: &str) -> ReleaseResult<Self> {
    Ok(serde_json::from_str(content)?)
  }

  pub fn request(&self, config: &NovaConfig) -> ReleaseRequest {
    ReleaseRequest {
      project: self.project.clone(),
      version: self.version.clone(),
      delivery: self.delivery.clone(),
      hotfix: self.hotfix.clone(),
      label: config.release.project_label.clone(),
    }
  }

  /// Compose the release with the configured label mapping
  pub fn compose(&self, config: &NovaConfig) -> ReleaseResult<Release> {
    let mapping = config.status_mapping()?;
    compose_release(&self.request(config), &self.components, &self.issues, &mapping)
  }

  /// Tags recorded for a component, matched by name ignoring case
  ///
  /// Case-variant keys are merged in key order, so `Orders` comes before `orders`.
  pub fn tags_for(&self, component_name: &str) -> Vec<Tag> {
    let wanted = component_name.to_lowercase();
    self
      .tags
      .iter()
      .filter(|(name, _)| name.to_lowercase() == wanted)
      .flat_map(|(_, tags)| tags.iter().cloned())
      .collect()
  }
}
