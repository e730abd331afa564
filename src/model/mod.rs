//! Release model: statuses, tasks, components and releases
//!
//! Everything here is pure computation over values handed in by the tracker
//! and version-control collaborators.

pub mod component;
pub mod release;
pub mod status;
pub mod task;

pub use component::{ColumnWidth, Component, ComponentType};
pub use release::{Release, ReleaseSummary, find_component};
pub use status::{Status, StatusMapping, aggregate};
pub use task::Task;
