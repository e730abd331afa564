//! Repository tag classification and per-component tag collections
//!
//! A tag belongs to a component when its name fits the component type:
//! services are tagged `v1.2.3` / `nova-1.2.3`, packages carry a package
//! prefix (`client-`, `contract-`, `domain-`). Package libraries accept any
//! tag because their historical tag names were never consistent.

use crate::core::config::PackageTagsConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::model::component::{Component, ComponentType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefixes of service release tags (lower-case)
const SERVICE_TAG_PREFIXES: &[&str] = &["v", "nova"];

/// Prefixes of package release tags (lower-case)
const PACKAGE_TAG_PREFIXES: &[&str] = &["client", "contract", "domain"];

/// A tag as reported by version control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub name: String,
  pub committed_at: DateTime<Utc>,
}

impl Tag {
  pub fn new(name: impl Into<String>, committed_at: DateTime<Utc>) -> Self {
    Self {
      name: name.into(),
      committed_at,
    }
  }

  pub fn kind(&self) -> TagKind {
    TagKind::of(&self.name)
  }
}

/// What a tag name looks like, independent of any component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
  Service,
  Package,
  Other,
}

impl TagKind {
  pub fn of(tag_name: &str) -> Self {
    let lower = tag_name.to_lowercase();
    if has_any_prefix(&lower, SERVICE_TAG_PREFIXES) {
      TagKind::Service
    } else if has_any_prefix(&lower, PACKAGE_TAG_PREFIXES) {
      TagKind::Package
    } else {
      TagKind::Other
    }
  }
}

fn has_any_prefix(name: &str, prefixes: &[&str]) -> bool {
  prefixes.iter().any(|p| name.starts_with(p))
}

/// Whether a tag marks a release of a service component
pub fn is_service_tag(component: &Component, tag_name: &str) -> bool {
  component.ctype() == ComponentType::Service && has_any_prefix(&tag_name.to_lowercase(), SERVICE_TAG_PREFIXES)
}

/// Whether a tag marks a release of a package component
///
/// Package libraries accept every tag.
pub fn is_package_tag(component: &Component, tag_name: &str) -> bool {
  has_any_prefix(&tag_name.to_lowercase(), PACKAGE_TAG_PREFIXES) || component.ctype() == ComponentType::PackageLibrary
}

/// Exported view of a tag, as written to tag reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
  pub package: String,
  pub tag: String,
  /// `YYYY-MM-DD`
  pub date: String,
  pub url: String,
}

/// Tags accepted for one component, in insertion order, without duplicates
#[derive(Debug, Clone)]
pub struct TagCollection<'a> {
  component: &'a Component,
  tags: Vec<Tag>,
}

impl<'a> TagCollection<'a> {
  pub fn new(component: &'a Component) -> Self {
    Self {
      component,
      tags: Vec::new(),
    }
  }

  /// Fold `try_add` over raw tags; rejected tags are skipped
  pub fn from_tags<I>(component: &'a Component, tags: I) -> Self
  where
    I: IntoIterator<Item = Tag>,
  {
    let mut collection = Self::new(component);
    for tag in tags {
      collection.try_add(tag);
    }
    collection
  }

  pub fn component(&self) -> &'a Component {
    self.component
  }

  pub fn tags(&self) -> &[Tag] {
    &self.tags
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
    self.tags.iter()
  }

  pub fn len(&self) -> usize {
    self.tags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }

  pub fn contains(&self, tag_name: &str) -> bool {
    self.tags.iter().any(|t| t.name == tag_name)
  }

  /// Add a tag if it is new and fits the component type
  ///
  /// Returns whether the tag was added.
  pub fn try_add(&mut self, tag: Tag) -> bool {
    if self.contains(&tag.name) {
      return false;
    }

    let accepted = match self.component.ctype() {
      ComponentType::Service => is_service_tag(self.component, &tag.name),
      ComponentType::Package | ComponentType::PackageLibrary => is_package_tag(self.component, &tag.name),
      ComponentType::Undefined => true,
    };

    if accepted {
      self.tags.push(tag);
    } else {
      debug!(
        component = self.component.name(),
        tag = %tag.name,
        "tag does not match component type"
      );
    }
    accepted
  }

  /// New collection with the tags whose name contains `template`
  pub fn filter(&self, template: &str) -> Self {
    let template = template.to_lowercase();
    Self::from_tags(
      self.component,
      self
        .tags
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&template))
        .cloned(),
    )
  }

  /// Tags committed on or after `date`
  pub fn since(&self, date: NaiveDate) -> Self {
    Self {
      component: self.component,
      tags: self
        .tags
        .iter()
        .filter(|t| t.committed_at.date_naive() >= date)
        .cloned()
        .collect(),
    }
  }

  /// Newest first; tags with equal dates keep their relative order
  pub fn sorted_by_date(&self) -> Self {
    let mut tags = self.tags.clone();
    tags.sort_by(|a, b| b.committed_at.cmp(&a.committed_at));
    Self {
      component: self.component,
      tags,
    }
  }

  /// Most recently committed tag
  pub fn latest(&self) -> Option<&Tag> {
    self.tags.iter().max_by_key(|t| t.committed_at)
  }

  /// Narrow to the component's configured tag template, if it has one
  pub fn apply_exception(&self, config: &PackageTagsConfig) -> Self {
    match config.exception_for(self.component.name()) {
      Some(exception) => self.filter(&exception.tag_template),
      None => self.clone(),
    }
  }

  /// Export records with web links to each tag
  pub fn tag_infos(&self) -> ReleaseResult<Vec<TagInfo>> {
    let repository = self
      .component
      .repository()
      .ok_or_else(|| ReleaseError::missing(format!("Repository of component {}", self.component.name())))?;

    self
      .tags
      .iter()
      .map(|tag| -> ReleaseResult<TagInfo> {
        Ok(TagInfo {
          package: self.component.name().to_string(),
          tag: tag.name.clone(),
          date: tag.committed_at.format("%Y-%m-%d").to_string(),
          url: repository.tag_url(&tag.name)?,
        })
      })
      .collect()
  }
}

impl<'a, 'b> IntoIterator for &'b TagCollection<'a> {
  type Item = &'b Tag;
  type IntoIter = std::slice::Iter<'b, Tag>;

  fn into_iter(self) -> Self::IntoIter {
    self.tags.iter()
  }
}
