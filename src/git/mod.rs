//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations the
//! release workflow needs, so the workflow can run against a real repository
//! or an in-memory mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording mock implementation for testing
//!
//! ```rust
//! # use image_release_tracker::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> image_release_tracker::Result<()> {
//! let tags = repo.list_tags()?;
//! if !repo.list_branches()?.iter().any(|b| b == "release/1.2") {
//!     repo.checkout("release/1.2", Some("master"))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitOperation, MockRepository};
pub use repository::Git2Repository;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::TrackerError]
/// variants. Nothing is retried; a failed operation aborts the caller.
pub trait Repository {
    /// Get the names of all tags in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get the names of all local branches
    fn list_branches(&self) -> Result<Vec<String>>;

    /// Switch to `branch`.
    ///
    /// With `create_from`, the branch is first created at the tip of that
    /// (mainline) branch. Without it, the branch must already exist.
    fn checkout(&self, branch: &str, create_from: Option<&str>) -> Result<()>;

    /// Push a local branch to `remote`, optionally recording it as the
    /// branch's upstream
    fn push_branch(&self, remote: &str, branch: &str, set_upstream: bool) -> Result<()>;

    /// Push tags to `remote`
    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()>;

    /// Stage `paths` (relative to [Repository::workdir]) and commit them on HEAD
    fn commit(&self, paths: &[&Path], message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Root of the working tree
    fn workdir(&self) -> Result<PathBuf>;
}
