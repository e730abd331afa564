//! Release: components delivered together under one version and delivery

use super::component::{ColumnWidth, Component, ComponentType};
use super::status::{Status, aggregate};
use crate::core::error::{ReleaseError, ReleaseResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Label used in titles when none is configured
pub const DEFAULT_PROJECT_LABEL: &str = "Nova";

/// Suffix on a lookup query requesting an exact name match
const EXACT_MATCH_MARKER: char = '!';

/// Components released together for one version/delivery pair
#[derive(Debug, Clone)]
pub struct Release {
  project: String,
  label: String,
  version: String,
  delivery: String,
  hotfix: Option<String>,
  components: Vec<Component>,
}

impl Release {
  pub fn new(project: impl Into<String>, version: impl Into<String>, delivery: impl Into<String>) -> Self {
    Self {
      project: project.into(),
      label: DEFAULT_PROJECT_LABEL.to_string(),
      version: version.into(),
      delivery: delivery.into(),
      hotfix: None,
      components: Vec::new(),
    }
  }

  /// Title label, e.g. the product name
  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = label.into();
    self
  }

  pub fn with_hotfix(mut self, hotfix: Option<String>) -> Self {
    self.hotfix = hotfix.filter(|h| !h.trim().is_empty());
    self
  }

  pub fn project(&self) -> &str {
    &self.project
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn delivery(&self) -> &str {
    &self.delivery
  }

  pub fn hotfix(&self) -> Option<&str> {
    self.hotfix.as_deref()
  }

  pub fn is_hotfix(&self) -> bool {
    self.hotfix.is_some()
  }

  /// `<label> <version>. Delivery <delivery>[. Hotfix <hotfix>]`
  ///
  /// Also the fix-version key the tracker knows the release by.
  pub fn title(&self) -> String {
    let mut title = format!("{} {}. Delivery {}", self.label, self.version, self.delivery);
    if let Some(hotfix) = &self.hotfix {
      title.push_str(&format!(". Hotfix {}", hotfix));
    }
    title
  }

  /// Append a component; names are checked for uniqueness only on lookup
  pub fn add_component(&mut self, component: Component) {
    self.components.push(component);
  }

  pub fn components(&self) -> &[Component] {
    &self.components
  }

  pub fn task_count(&self) -> usize {
    self.components.iter().map(|c| c.tasks().len()).sum()
  }

  /// Aggregate over the distinct component statuses
  pub fn status(&self) -> Status {
    let distinct: BTreeSet<Status> = self.components.iter().map(Component::status).collect();
    aggregate(distinct)
  }

  /// Only a fully done release may be marked released in the tracker
  pub fn can_release_version(&self) -> bool {
    self.status() == Status::Done
  }

  /// Find a component by name, see [`find_component`]
  pub fn get_component_by_name(&self, query: &str) -> ReleaseResult<Option<&Component>> {
    find_component(&self.components, query)
  }

  /// Like [`Release::get_component_by_name`], but no match is an error too
  pub fn require_component(&self, query: &str) -> ReleaseResult<&Component> {
    self.get_component_by_name(query)?.ok_or_else(|| {
      ReleaseError::with_help(
        format!("Component '{}' is not part of {}", query, self.title()),
        "Run `nova-release status` to list the components of this release",
      )
    })
  }

  /// Multi-line status report: title, one line per component, totals
  pub fn describe_status(&self) -> String {
    let title = self.title();
    let separator = "*".repeat(title.chars().count());
    let width = ColumnWidth::of(self.components.iter().map(Component::name));

    let mut lines = vec![title.clone(), separator.clone()];
    lines.extend(self.components.iter().map(|c| c.describe_status(&width)));
    lines.push(separator);
    lines.push(format!("Total: {} component(s)", self.components.len()));
    lines.push(format!("Total: {} task(s)", self.task_count()));
    lines.push(format!("Status: {}", self.status()));
    lines.join("\n")
  }

  /// Serializable snapshot for machine-readable output
  pub fn summary(&self) -> ReleaseSummary {
    ReleaseSummary {
      title: self.title(),
      status: self.status(),
      can_release: self.can_release_version(),
      task_count: self.task_count(),
      components: self
        .components
        .iter()
        .map(|c| ComponentSummary {
          name: c.name().to_string(),
          ctype: c.ctype(),
          status: c.status(),
          tasks: c.tasks().len(),
        })
        .collect(),
    }
  }
}

/// Find a component by name
///
/// `query!` matches the name exactly, anything else matches as a substring.
/// Both ignore case. More than one match is an error.
pub fn find_component<'a>(components: &'a [Component], query: &str) -> ReleaseResult<Option<&'a Component>> {
  let matches: Vec<&Component> = match query.strip_suffix(EXACT_MATCH_MARKER) {
    Some("") => return Ok(None),
    Some(exact) => {
      let exact = exact.to_lowercase();
      components.iter().filter(|c| c.name().to_lowercase() == exact).collect()
    }
    None => {
      let needle = query.to_lowercase();
      components
        .iter()
        .filter(|c| c.name().to_lowercase().contains(&needle))
        .collect()
    }
  };

  match matches.as_slice() {
    [] => Ok(None),
    [single] => Ok(Some(*single)),
    _ => Err(ReleaseError::Ambiguous {
      query: query.to_string(),
      matches: matches.iter().map(|c| c.name().to_string()).collect(),
    }),
  }
}

impl fmt::Display for Release {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.title())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
  pub title: String,
  pub status: Status,
  pub can_release: bool,
  pub task_count: usize,
  pub components: Vec<ComponentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
  pub name: String,
  #[serde(rename = "type")]
  pub ctype: ComponentType,
  pub status: Status,
  pub tasks: usize,
}
