//! Domain logic - pure release rules independent of git and the registry

pub mod branch;
pub mod template;
pub mod version;

pub use branch::{release_branch, BranchSet};
pub use template::BuildTemplate;
pub use version::{Edition, ReleaseVersion};
