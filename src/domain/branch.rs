use std::collections::BTreeSet;

use crate::domain::ReleaseVersion;
use crate::error::Result;
use crate::git::Repository;

/// Branch that collects every patch release of a minor line, e.g. "release/10.7"
pub fn release_branch(version: &ReleaseVersion) -> String {
    format!("release/{}.{}", version.major, version.minor)
}

/// Local branch names, kept current while releases are applied.
///
/// Must be refreshed (or extended) right after a branch is created so the
/// next release on the same minor line switches instead of branching again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSet {
    names: BTreeSet<String>,
}

impl BranchSet {
    /// Read the current branch list from the repository
    pub fn load<R: Repository>(repo: &R) -> Result<Self> {
        Ok(repo.list_branches()?.into_iter().collect())
    }

    /// Replace the set with the repository's current branch list
    pub fn refresh<R: Repository>(&mut self, repo: &R) -> Result<()> {
        *self = Self::load(repo)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for BranchSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        BranchSet {
            names: iter.into_iter().collect(),
        }
    }
}
