//! Release-able units of code and the tasks assigned to them

use super::status::{STATUS_WIDTH, Status, aggregate};
use super::task::Task;
use crate::core::error::{ReleaseError, ReleaseResult, ValidationError};
use crate::vcs::repository::{HostKind, Repository};
use crate::vcs::revision::get_comparison_url;
use serde::Serialize;
use std::fmt;

/// Canonical name of the placeholder component
pub const PLACEHOLDER_NAME: &str = "n/a";

/// Tracker names that resolve to the placeholder component
const PLACEHOLDER_ALIASES: &[&str] = &[PLACEHOLDER_NAME, "multiple components"];

/// Kind of deliverable a component produces, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
  Undefined,
  /// Deployable micro-service
  Service,
  /// Client or contracts package
  Package,
  /// Infrastructure library package
  PackageLibrary,
}

impl ComponentType {
  /// Classify a component by name suffix
  ///
  /// `...contracts` / `...client` are packages, `...library` is a package
  /// library, any other non-empty name is a service.
  pub fn classify(name: &str) -> Self {
    if name.is_empty() {
      return ComponentType::Undefined;
    }

    let lower = name.to_lowercase();
    if lower.ends_with("contracts") || lower.ends_with("client") {
      ComponentType::Package
    } else if lower.ends_with("library") {
      ComponentType::PackageLibrary
    } else {
      ComponentType::Service
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ComponentType::Undefined => "UNDEFINED",
      ComponentType::Service => "SERVICE",
      ComponentType::Package => "PACKAGE",
      ComponentType::PackageLibrary => "PACKAGE_LIBRARY",
    }
  }
}

impl fmt::Display for ComponentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

/// Width of the name column in status descriptions
///
/// Accumulates the longest name it has observed. Callers own it and pass it
/// to [`Component::describe_status`]; `reset` starts over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidth(usize);

impl ColumnWidth {
  pub fn new() -> Self {
    Self::default()
  }

  /// Width fitting every given name
  pub fn of<'a, I>(names: I) -> Self
  where
    I: IntoIterator<Item = &'a str>,
  {
    let mut width = Self::new();
    for name in names {
      width.observe(name);
    }
    width
  }

  pub fn observe(&mut self, name: &str) {
    self.0 = self.0.max(name.chars().count());
  }

  pub fn get(&self) -> usize {
    self.0
  }

  pub fn reset(&mut self) {
    self.0 = 0;
  }
}

/// A release-able unit of code with its tracker tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
  name: String,
  repository: Option<Repository>,
  ctype: ComponentType,
  tasks: Vec<Task>,
  placeholder: bool,
}

impl Component {
  /// Create a component; its type is derived from the name once, here
  pub fn new(name: impl Into<String>, repository: Option<Repository>) -> ReleaseResult<Self> {
    let name = name.into();
    if name.trim().is_empty() {
      return Err(ReleaseError::missing("Component name"));
    }
    let ctype = ComponentType::classify(&name);
    Ok(Self {
      name,
      repository,
      ctype,
      tasks: Vec::new(),
      placeholder: false,
    })
  }

  /// Placeholder for tracker issues that map to no real release unit
  pub fn placeholder() -> Self {
    Self {
      name: PLACEHOLDER_NAME.to_string(),
      repository: None,
      ctype: ComponentType::Undefined,
      tasks: Vec::new(),
      placeholder: true,
    }
  }

  /// Whether a tracker component name denotes the placeholder
  pub fn is_placeholder_name(name: &str) -> bool {
    let normalized = name.trim().to_lowercase();
    PLACEHOLDER_ALIASES.contains(&normalized.as_str())
  }

  /// Placeholder component for placeholder names, `None` otherwise
  pub fn parse_placeholder(name: &str) -> Option<Self> {
    Self::is_placeholder_name(name).then(Self::placeholder)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn repository(&self) -> Option<&Repository> {
    self.repository.as_ref()
  }

  pub fn ctype(&self) -> ComponentType {
    self.ctype
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn is_placeholder(&self) -> bool {
    self.placeholder
  }

  pub fn add_task(&mut self, task: Task) {
    self.tasks.push(task);
  }

  pub fn add_tasks<I>(&mut self, tasks: I)
  where
    I: IntoIterator<Item = Task>,
  {
    self.tasks.extend(tasks);
  }

  /// Aggregated status of all tasks; the placeholder is always `UNDEFINED`
  pub fn status(&self) -> Status {
    if self.placeholder {
      return Status::Undefined;
    }
    aggregate(self.tasks.iter().map(Task::status))
  }

  /// Fixed-width line: `name | status | count tasks`
  pub fn describe_status(&self, width: &ColumnWidth) -> String {
    format!(
      "{:<name_width$} | {:<status_width$} | {:>3} tasks",
      self.name,
      self.status(),
      self.tasks.len(),
      name_width = width.get(),
      status_width = STATUS_WIDTH
    )
  }

  /// Release notes assembled from task notes, laid out per repository host
  ///
  /// Components without a repository, or on an unknown host, have no notes.
  /// The GitHub layout ends with a comparison link only for a valid forward
  /// revision range.
  pub fn get_release_notes(&self, revision_from: Option<&str>, revision_to: Option<&str>) -> String {
    let Some(repository) = &self.repository else {
      return String::new();
    };

    match repository.host() {
      HostKind::GitHub => self.github_notes(repository, revision_from, revision_to),
      HostKind::Bitbucket => self.task_bullets(),
      HostKind::Unknown => String::new(),
    }
  }

  /// One preview line per task, flagging tasks with deployment steps
  pub fn get_preview_notes(&self) -> String {
    self
      .tasks
      .iter()
      .map(|t| t.get_release_notes(true))
      .collect::<Vec<_>>()
      .join("\n")
  }

  /// Fail unless the component is ready to be tagged and released
  pub fn ensure_releasable(&self) -> ReleaseResult<()> {
    let not_releasable = |reason: String| {
      Err(ReleaseError::Validation(ValidationError::NotReleasable {
        name: self.name.clone(),
        reason,
      }))
    };

    match self.status() {
      Status::Done => return not_releasable("is already released".to_string()),
      Status::ReadyForRelease => {}
      other => return not_releasable(format!("is not ready for release (status {})", other)),
    }

    if self.repository.is_none() {
      return not_releasable("has no repository to release from".to_string());
    }
    Ok(())
  }

  fn task_bullets(&self) -> String {
    self
      .tasks
      .iter()
      .map(|t| format!("* {}", t.get_release_notes(false)))
      .collect::<Vec<_>>()
      .join("\n")
  }

  fn github_notes(&self, repository: &Repository, revision_from: Option<&str>, revision_to: Option<&str>) -> String {
    let mut notes = String::from("## What's changed\n\n");
    notes.push_str(&self.task_bullets());

    let from = revision_from.map(str::to_lowercase);
    let to = revision_to.map(str::to_lowercase);
    let url = repository.url().to_lowercase();
    let comparison = get_comparison_url(from.as_deref(), to.as_deref(), Some(url.as_str()));
    if !comparison.is_empty() {
      notes.push_str(&format!("\n\n**Full Changelog**: {}", comparison));
    }

    notes
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
