//! Error types for nova-release with contextual messages and exit codes
//!
//! Validation, parse and ambiguity failures raised by the release model all
//! surface through [`ReleaseError`] so the orchestration layer can report them
//! to the operator. Every category maps to a process exit code and most carry
//! a help message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for nova-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, ambiguous lookups, bad versions)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (bad tracker data, release gate closed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for nova-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Caller-fixable input problems
  Validation(ValidationError),

  /// Malformed revision or version strings
  Parse(ParseError),

  /// A name lookup matched more than one component
  Ambiguous { query: String, matches: Vec<String> },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors, with the operation that failed
  Io {
    source: io::Error,
    context: Option<String>,
  },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Shorthand for a missing or empty required value
  pub fn missing(field: impl Into<String>) -> Self {
    ReleaseError::Validation(ValidationError::Missing { field: field.into() })
  }

  /// Shorthand for invalid input that is present but unusable
  pub fn invalid(message: impl Into<String>) -> Self {
    ReleaseError::Validation(ValidationError::Invalid {
      message: message.into(),
      help: None,
    })
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io { source, context } => ReleaseError::Io {
        source,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::Parse(_) => ExitCode::User,
      ReleaseError::Ambiguous { .. } => ExitCode::User,
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Io { .. } => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::Parse(e) => e.help_message(),
      ReleaseError::Ambiguous { query, .. } => Some(format!(
        "Use a more specific name, or append '!' to require an exact match (e.g. '{}!').",
        query.trim_end_matches('!')
      )),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io { .. } => None,
    }
  }

  /// True for input-validation failures
  pub fn is_validation(&self) -> bool {
    matches!(self, ReleaseError::Validation(_))
  }

  /// True for revision/version parse failures
  pub fn is_parse(&self) -> bool {
    matches!(self, ReleaseError::Parse(_))
  }

  /// True when a lookup matched several components
  pub fn is_ambiguous(&self) -> bool {
    matches!(self, ReleaseError::Ambiguous { .. })
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Parse(e) => write!(f, "{}", e),
      ReleaseError::Ambiguous { query, matches } => {
        write!(
          f,
          "More than one component matches '{}': {}",
          query,
          matches.join(", ")
        )
      }
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io { source, context } => {
        write!(f, "I/O error: {}", source)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io { source, .. } => Some(source),
      ReleaseError::Parse(ParseError::Version { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io {
      source: err,
      context: None,
    }
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<ValidationError> for ReleaseError {
  fn from(err: ValidationError) -> Self {
    ReleaseError::Validation(err)
  }
}

impl From<ParseError> for ReleaseError {
  fn from(err: ParseError) -> Self {
    ReleaseError::Parse(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::Config(ConfigError::Invalid {
      message: format!("TOML deserialization error: {}", err),
    })
  }
}

impl From<semver::Error> for ReleaseError {
  fn from(source: semver::Error) -> Self {
    ReleaseError::Parse(ParseError::Version {
      input: String::new(),
      source,
    })
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<chrono::ParseError> for ReleaseError {
  fn from(err: chrono::ParseError) -> Self {
    ReleaseError::invalid(format!("Invalid date: {}", err))
  }
}

/// Input validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// A required value is absent or blank
  Missing { field: String },

  /// A value is present but cannot be used
  Invalid { message: String, help: Option<String> },

  /// A component or release is not in a releasable state
  NotReleasable { name: String, reason: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::Invalid { help, .. } => help.clone(),
      ValidationError::NotReleasable { .. } => {
        Some("Run `nova-release status` to see which tasks are still open.".to_string())
      }
      ValidationError::Missing { .. } => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::Missing { field } => write!(f, "{} is not specified", field),
      ValidationError::Invalid { message, .. } => write!(f, "{}", message),
      ValidationError::NotReleasable { name, reason } => write!(f, "[{}] {}", name, reason),
    }
  }
}

/// Revision and version parse errors
#[derive(Debug)]
pub enum ParseError {
  /// The normalized revision is not a valid version token
  Version { input: String, source: semver::Error },

  /// The revision has a shape the version parser cannot be fed
  Malformed { input: String },
}

impl ParseError {
  fn help_message(&self) -> Option<String> {
    Some("Revisions must look like MAJOR[.MINOR[.PATCH]], optionally prefixed with 'nova-'.".to_string())
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::Version { input, source } if input.is_empty() => write!(f, "Invalid version: {}", source),
      ParseError::Version { input, source } => write!(f, "Invalid version '{}': {}", input, source),
      ParseError::Malformed { input } => write!(f, "Invalid version '{}'", input),
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Config content is unusable
  Invalid { message: String },

  /// Unknown status name in the label mapping table
  UnknownStatus { label: String, value: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use release.toml from the working directory, or built-in defaults.".to_string())
      }
      ConfigError::UnknownStatus { .. } => Some(
        "Valid statuses are: UNDEFINED, IN_DEVELOPMENT, READY_FOR_RELEASE, DONE".to_string(),
      ),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::Invalid { message } => write!(f, "Invalid configuration: {}", message),
      ConfigError::UnknownStatus { label, value } => {
        write!(f, "Tracker label '{}' maps to unknown status '{}'", label, value)
      }
    }
  }
}

/// Result type alias for nova-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
