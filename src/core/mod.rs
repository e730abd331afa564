//! Ambient plumbing shared by the model and the CLI
//!
//! - **config**: release.toml discovery, parsing and validation
//! - **error**: error types with contextual help messages and exit codes
//! - **telemetry**: tracing subscriber setup for the binary

pub mod config;
pub mod error;
pub mod telemetry;
