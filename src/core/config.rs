use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::model::release::DEFAULT_PROJECT_LABEL;
use crate::model::status::StatusMapping;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters that cannot appear in folder names on common file systems
const INVALID_PATH_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Configuration for nova-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovaConfig {
  #[serde(default)]
  pub release: ReleaseConfig,
  #[serde(default)]
  pub tracker: TrackerConfig,
  #[serde(default)]
  pub package_tags: PackageTagsConfig,
}

/// `[release]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Label that opens release titles (default: "Nova")
  #[serde(default = "default_project_label")]
  pub project_label: String,

  /// Artifacts folder name, with `{nova}`, `{delivery}` and `{hotfix}` placeholders
  #[serde(default)]
  pub artifacts_folder_template: Option<String>,
}

fn default_project_label() -> String {
  DEFAULT_PROJECT_LABEL.to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      project_label: default_project_label(),
      artifacts_folder_template: None,
    }
  }
}

impl ReleaseConfig {
  /// Folder name for release artifacts, safe to create on disk
  pub fn artifacts_folder_path(&self, version: &str, delivery: &str, hotfix: Option<&str>) -> ReleaseResult<String> {
    let template = self
      .artifacts_folder_template
      .as_deref()
      .filter(|t| !t.trim().is_empty())
      .ok_or_else(|| ReleaseError::missing("release.artifacts_folder_template"))?;

    let hotfix = match hotfix {
      Some(h) if !h.is_empty() => format!(" Hotfix {}", h),
      _ => String::new(),
    };
    let formatted = template
      .replace("{nova}", &format!("{} {}.", self.project_label, version))
      .replace("{delivery}", &format!("Delivery {}.", delivery))
      .replace("{hotfix}", &hotfix);

    Ok(sanitize_path(&formatted))
  }
}

/// `[tracker]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
  /// Extra workflow labels mapped to status names (e.g. "Code Review" = "IN_DEVELOPMENT")
  #[serde(default)]
  pub status_labels: HashMap<String, String>,
}

/// `[package_tags]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageTagsConfig {
  #[serde(default)]
  pub exceptions: Vec<TagException>,
}

/// Package whose tags must additionally contain a template string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagException {
  pub name: String,
  pub tag_template: String,
}

impl PackageTagsConfig {
  pub fn exception_for(&self, package_name: &str) -> Option<&TagException> {
    self.exceptions.iter().find(|e| e.name == package_name)
  }

  pub fn validate(&self) -> ReleaseResult<()> {
    for exception in &self.exceptions {
      if exception.name.trim().is_empty() {
        return Err(ReleaseError::Config(ConfigError::Invalid {
          message: "package_tags.exceptions entry has an empty name".to_string(),
        }));
      }
      if exception.tag_template.trim().is_empty() {
        return Err(ReleaseError::Config(ConfigError::Invalid {
          message: format!("package_tags.exceptions entry '{}' has an empty tag_template", exception.name),
        }));
      }
    }
    Ok(())
  }
}

impl NovaConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the working directory, falling back to defaults
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => Ok(Self::default()),
    }
  }

  /// Load an explicit config file; a missing file is an error
  pub fn load_from(config_path: &Path) -> ReleaseResult<Self> {
    if !config_path.exists() {
      return Err(ReleaseError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: NovaConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// `--config` when given, otherwise the search in `cwd`
  pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> ReleaseResult<Self> {
    match explicit {
      Some(path) => Self::load_from(path),
      None => Self::load(cwd),
    }
  }

  pub fn validate(&self) -> ReleaseResult<()> {
    if self.release.project_label.trim().is_empty() {
      return Err(ReleaseError::Config(ConfigError::Invalid {
        message: "release.project_label must not be empty".to_string(),
      }));
    }
    self.package_tags.validate()?;
    self.status_mapping().map(|_| ())
  }

  /// Default tracker label table extended by `[tracker.status_labels]`
  pub fn status_mapping(&self) -> ReleaseResult<StatusMapping> {
    StatusMapping::from_config(&self.tracker.status_labels)
  }
}

/// Replace characters that are invalid in folder names with `_`
pub fn sanitize_path(path: &str) -> String {
  path
    .chars()
    .map(|c| if INVALID_PATH_CHARS.contains(&c) { '_' } else { c })
    .collect()
}
