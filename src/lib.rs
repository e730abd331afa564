//! Release management assistant for Nova
//!
//! Aggregates tracker tasks into components, decides whether a component or a
//! whole release can ship, renders release notes, and classifies repository
//! tags per component.
//!
//! - **model**: status lattice, tasks, components, releases
//! - **vcs**: repository references, revision comparison, tag collections
//! - **tracker**: tracker DTOs and release composition
//! - **notes**: changelog text helpers
//! - **core**: configuration, errors, logging
//! - **commands**: CLI command implementations

pub mod commands;
pub mod core;
pub mod model;
pub mod notes;
pub mod tracker;
pub mod vcs;
