//! Task, component and release status lattice
//!
//! Statuses are driven by the tracker; this module only reads and aggregates
//! them. [`aggregate`] is not a `min()` reduction: a mix of
//! `READY_FOR_RELEASE` and `DONE` is still "ready", and a single `UNDEFINED`
//! poisons the whole set.

use crate::core::error::{ConfigError, ReleaseResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Workflow status shared by tasks, components and releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
  /// No data, or data the tracker mapping does not understand
  Undefined,
  /// Work is ongoing
  InDevelopment,
  /// Tracker marks the issue selected for release
  ReadyForRelease,
  /// Tracker marks the issue done
  Done,
}

/// Width of the widest status name, used for table columns
pub const STATUS_WIDTH: usize = 17;

impl Status {
  pub const ALL: [Status; 4] = [
    Status::Undefined,
    Status::InDevelopment,
    Status::ReadyForRelease,
    Status::Done,
  ];

  /// Name used in status descriptions and config files
  pub fn as_str(&self) -> &'static str {
    match self {
      Status::Undefined => "UNDEFINED",
      Status::InDevelopment => "IN_DEVELOPMENT",
      Status::ReadyForRelease => "READY_FOR_RELEASE",
      Status::Done => "DONE",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // pad() keeps width/alignment flags working in describe_status columns
    f.pad(self.as_str())
  }
}

impl FromStr for Status {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_uppercase().as_str() {
      "UNDEFINED" => Ok(Status::Undefined),
      "IN_DEVELOPMENT" => Ok(Status::InDevelopment),
      "READY_FOR_RELEASE" => Ok(Status::ReadyForRelease),
      "DONE" => Ok(Status::Done),
      _ => Err(format!("unknown status '{}'", s)),
    }
  }
}

/// Aggregate a set of statuses into one
///
/// 1. empty input is `UNDEFINED`
/// 2. any `UNDEFINED` makes the result `UNDEFINED`
/// 3. all `DONE` is `DONE`
/// 4. all at least `READY_FOR_RELEASE` is `READY_FOR_RELEASE`
/// 5. everything else is `IN_DEVELOPMENT`
pub fn aggregate<I>(statuses: I) -> Status
where
  I: IntoIterator<Item = Status>,
{
  let mut seen_any = false;
  let mut all_done = true;
  let mut all_ready = true;

  for status in statuses {
    seen_any = true;
    match status {
      Status::Undefined => return Status::Undefined,
      Status::InDevelopment => {
        all_done = false;
        all_ready = false;
      }
      Status::ReadyForRelease => all_done = false,
      Status::Done => {}
    }
  }

  if !seen_any {
    Status::Undefined
  } else if all_done {
    Status::Done
  } else if all_ready {
    Status::ReadyForRelease
  } else {
    Status::InDevelopment
  }
}

/// Tracker status labels recognised out of the box
const DEFAULT_LABELS: &[(&str, Status)] = &[
  ("Selected For Release", Status::ReadyForRelease),
  ("Done", Status::Done),
  ("In Development", Status::InDevelopment),
  ("Ready for UAT", Status::InDevelopment),
  ("Ready for testing", Status::InDevelopment),
  ("In Testing", Status::InDevelopment),
  ("Ready for Review", Status::InDevelopment),
  ("Open", Status::InDevelopment),
];

/// Mapping from free-text tracker workflow labels to [`Status`]
///
/// Labels are matched exactly. Anything not in the table is `UNDEFINED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
  labels: HashMap<String, Status>,
}

impl Default for StatusMapping {
  fn default() -> Self {
    Self {
      labels: DEFAULT_LABELS
        .iter()
        .map(|(label, status)| (label.to_string(), *status))
        .collect(),
    }
  }
}

impl StatusMapping {
  /// Default table extended (and overridden) by configured labels
  ///
  /// Config values are status names such as `IN_DEVELOPMENT`.
  pub fn from_config(extra: &HashMap<String, String>) -> ReleaseResult<Self> {
    let mut mapping = Self::default();
    for (label, value) in extra {
      let status = value.parse::<Status>().map_err(|_| ConfigError::UnknownStatus {
        label: label.clone(),
        value: value.clone(),
      })?;
      mapping.insert(label.clone(), status);
    }
    Ok(mapping)
  }

  /// Add or replace a single label
  pub fn insert(&mut self, label: impl Into<String>, status: Status) {
    self.labels.insert(label.into(), status);
  }

  /// Map a tracker label, falling back to `UNDEFINED`
  pub fn map(&self, label: &str) -> Status {
    self.labels.get(label).copied().unwrap_or(Status::Undefined)
  }

  /// Whether the label is in the table at all
  pub fn recognizes(&self, label: &str) -> bool {
    self.labels.contains_key(label)
  }
}
