use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::git::Repository;

/// A mutating operation performed against a [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOperation {
    Checkout {
        branch: String,
        created_from: Option<String>,
    },
    PushBranch {
        remote: String,
        branch: String,
        set_upstream: bool,
    },
    PushTags {
        remote: String,
        tags: Vec<String>,
    },
    Commit {
        paths: Vec<PathBuf>,
        message: String,
    },
    Tag {
        name: String,
        message: String,
    },
}

/// Mock repository for testing without actual git operations
///
/// Mutating calls update the in-memory tags/branches and are recorded in
/// order, so tests can assert on exactly what a workflow did.
pub struct MockRepository {
    tags: RefCell<Vec<String>>,
    branches: RefCell<Vec<String>>,
    head: RefCell<Option<String>>,
    operations: RefCell<Vec<GitOperation>>,
    workdir: PathBuf,
    fail_pushes: Cell<bool>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at the current directory
    pub fn new() -> Self {
        Self::with_workdir(".")
    }

    /// Create a new empty mock repository whose working tree is `workdir`
    pub fn with_workdir(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            tags: RefCell::new(Vec::new()),
            branches: RefCell::new(Vec::new()),
            head: RefCell::new(None),
            operations: RefCell::new(Vec::new()),
            workdir: workdir.into(),
            fail_pushes: Cell::new(false),
        }
    }

    /// Add an existing tag
    pub fn add_tag(&self, name: impl Into<String>) {
        self.tags.borrow_mut().push(name.into());
    }

    /// Add an existing local branch
    pub fn add_branch(&self, name: impl Into<String>) {
        self.branches.borrow_mut().push(name.into());
    }

    /// Make every subsequent push fail
    pub fn fail_pushes(&self) {
        self.fail_pushes.set(true);
    }

    /// All mutating operations in the order they happened
    pub fn operations(&self) -> Vec<GitOperation> {
        self.operations.borrow().clone()
    }

    /// Currently checked out branch, if any checkout happened
    pub fn head(&self) -> Option<String> {
        self.head.borrow().clone()
    }

    fn record(&self, operation: GitOperation) {
        self.operations.borrow_mut().push(operation);
    }

    fn check_push(&self, remote: &str) -> Result<()> {
        if self.fail_pushes.get() {
            return Err(TrackerError::remote(format!(
                "Push to '{}' rejected",
                remote
            )));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.borrow().clone())
    }

    fn checkout(&self, branch: &str, create_from: Option<&str>) -> Result<()> {
        let exists = self.branches.borrow().iter().any(|b| b == branch);

        match create_from {
            Some(base) => {
                if exists {
                    return Err(TrackerError::branch(format!(
                        "Branch '{}' already exists",
                        branch
                    )));
                }
                if !self.branches.borrow().iter().any(|b| b == base) {
                    return Err(TrackerError::branch(format!(
                        "Cannot find branch '{}'",
                        base
                    )));
                }
                self.add_branch(branch);
            }
            None if !exists => {
                return Err(TrackerError::branch(format!(
                    "Cannot find branch '{}'",
                    branch
                )));
            }
            None => {}
        }

        *self.head.borrow_mut() = Some(branch.to_string());
        self.record(GitOperation::Checkout {
            branch: branch.to_string(),
            created_from: create_from.map(str::to_string),
        });
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str, set_upstream: bool) -> Result<()> {
        self.check_push(remote)?;
        self.record(GitOperation::PushBranch {
            remote: remote.to_string(),
            branch: branch.to_string(),
            set_upstream,
        });
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        self.check_push(remote)?;
        self.record(GitOperation::PushTags {
            remote: remote.to_string(),
            tags: tag_names.iter().map(|t| t.to_string()).collect(),
        });
        Ok(())
    }

    fn commit(&self, paths: &[&Path], message: &str) -> Result<()> {
        self.record(GitOperation::Commit {
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tags.borrow().iter().any(|t| t == name) {
            return Err(TrackerError::tag(format!("Tag '{}' already exists", name)));
        }
        self.add_tag(name);
        self.record(GitOperation::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_list_tags() {
        let repo = MockRepository::new();
        repo.add_tag("1.2.3-ce.0");
        repo.add_tag("latest");

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&"1.2.3-ce.0".to_string()));
    }

    #[test]
    fn test_mock_repository_checkout_creates_branch() {
        let repo = MockRepository::new();
        repo.add_branch("master");

        repo.checkout("release/1.2", Some("master")).unwrap();

        assert!(repo.list_branches().unwrap().contains(&"release/1.2".to_string()));
        assert_eq!(repo.head().as_deref(), Some("release/1.2"));
        assert_eq!(
            repo.operations(),
            vec![GitOperation::Checkout {
                branch: "release/1.2".to_string(),
                created_from: Some("master".to_string()),
            }]
        );
    }

    #[test]
    fn test_mock_repository_checkout_missing_branch() {
        let repo = MockRepository::new();
        assert!(repo.checkout("release/9.9", None).is_err());
        assert!(repo.operations().is_empty());
    }

    #[test]
    fn test_mock_repository_duplicate_tag() {
        let repo = MockRepository::new();
        repo.add_tag("1.2.3-ce.0");
        let err = repo.create_annotated_tag("1.2.3-ce.0", "Release").unwrap_err();
        assert!(matches!(err, TrackerError::Tag(_)));
    }

    #[test]
    fn test_mock_repository_failing_push() {
        let repo = MockRepository::new();
        repo.fail_pushes();
        let err = repo.push_tags("origin", &["1.2.3-ce.1"]).unwrap_err();
        assert!(matches!(err, TrackerError::Remote(_)));
        assert!(repo.operations().is_empty());
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert_eq!(repo.workdir().unwrap(), PathBuf::from("."));
    }
}
