//! Version-control side of a release: repositories, revisions and tags

pub mod repository;
pub mod revision;
pub mod tags;

pub use repository::{HostKind, Repository};
pub use revision::{compare_revisions, get_comparison_url, next_version, normalize, parse_revision};
pub use tags::{Tag, TagCollection, TagInfo, TagKind, is_package_tag, is_service_tag};
