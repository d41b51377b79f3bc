//! Per-release publishing: branch, generated file, commit, tag, push.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::RepositoryConfig;
use crate::domain::{release_branch, BranchSet, BuildTemplate, ReleaseVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::ui;

/// What happened for one release
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedRelease {
    /// The release tag
    pub version: String,

    /// The release branch it was committed to
    pub branch: String,

    /// Whether the branch was created for this release
    pub branch_created: bool,

    /// Whether every mutating step was only described
    pub dry_run: bool,
}

/// Applies releases one at a time against a repository.
///
/// Owns the branch set for the whole loop so that a branch created for one
/// release is seen by the next.
pub struct ReleaseApplier<'a, R: Repository> {
    repo: &'a R,
    config: &'a RepositoryConfig,
    image: &'a str,
    template: &'a BuildTemplate,
    dry_run: bool,
    branches: BranchSet,
}

impl<'a, R: Repository> ReleaseApplier<'a, R> {
    pub fn new(
        repo: &'a R,
        config: &'a RepositoryConfig,
        image: &'a str,
        template: &'a BuildTemplate,
        dry_run: bool,
    ) -> Result<Self> {
        Ok(ReleaseApplier {
            repo,
            config,
            image,
            template,
            dry_run,
            branches: BranchSet::load(repo)?,
        })
    }

    /// Publish one release. Any failure aborts with the repository left as is.
    pub fn apply(&mut self, release: &ReleaseVersion) -> Result<PublishedRelease> {
        let branch = release_branch(release);
        ui::display_status(&format!("Publishing {} on {}", release, branch));

        let branch_created = self.ensure_branch(&branch)?;

        let contents = self.template.render(self.image, release.as_str());
        self.write_build_file(&contents)?;
        self.commit_tag_and_push(release, &branch)?;

        if !self.dry_run {
            info!(%release, %branch, branch_created, "release published");
            ui::display_success(&format!("Published {}", release));
        }

        Ok(PublishedRelease {
            version: release.to_string(),
            branch,
            branch_created,
            dry_run: self.dry_run,
        })
    }

    /// Switch to `branch`, creating it from mainline if needed.
    ///
    /// Returns whether the branch was created.
    fn ensure_branch(&mut self, branch: &str) -> Result<bool> {
        if self.branches.contains(branch) {
            if self.dry_run {
                ui::display_dry_run_step(&format!("would switch to branch {}", branch));
            } else {
                self.repo.checkout(branch, None)?;
            }
            return Ok(false);
        }

        let mainline = self.config.mainline.as_str();
        let remote = self.config.remote.as_str();

        if self.dry_run {
            ui::display_dry_run_step(&format!(
                "would create branch {} from {}",
                branch, mainline
            ));
            ui::display_dry_run_step(&format!(
                "would push {} to {} and track it upstream",
                branch, remote
            ));
            self.branches.insert(branch);
        } else {
            self.repo.checkout(branch, Some(mainline))?;
            self.repo.push_branch(remote, branch, true)?;
            self.branches.refresh(self.repo)?;
            info!(branch, mainline, "created release branch");
        }

        Ok(true)
    }

    fn write_build_file(&self, contents: &str) -> Result<()> {
        let build_file = self.config.build_file.as_str();

        if self.dry_run {
            ui::display_rendered_file(build_file, contents);
            return Ok(());
        }

        let path = self.repo.workdir()?.join(build_file);
        fs::write(&path, contents)?;
        Ok(())
    }

    fn commit_tag_and_push(&self, release: &ReleaseVersion, branch: &str) -> Result<()> {
        let commit_message = format!("Update {} to {}", self.image, release);
        let tag_message = format!("Release {}", release);
        let remote = self.config.remote.as_str();

        if self.dry_run {
            ui::display_dry_run_step(&format!(
                "would commit {} with message '{}'",
                self.config.build_file, commit_message
            ));
            ui::display_dry_run_step(&format!(
                "would create tag {} with message '{}'",
                release, tag_message
            ));
            ui::display_dry_run_step(&format!(
                "would push {} and tag {} to {}",
                branch, release, remote
            ));
            return Ok(());
        }

        self.repo
            .commit(&[Path::new(&self.config.build_file)], &commit_message)?;
        self.repo
            .create_annotated_tag(release.as_str(), &tag_message)?;
        self.repo.push_branch(remote, branch, false)?;
        self.repo.push_tags(remote, &[release.as_str()])?;

        Ok(())
    }
}
