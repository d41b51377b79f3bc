use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{BranchType, Cred, CredentialType, ObjectType, PushOptions, RemoteCallbacks};
use tracing::debug;

use crate::error::{Result, TrackerError};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: git2::Repository,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;

        Ok(Git2Repository { repo })
    }

    fn push_refspecs(&self, remote_name: &str, refspecs: &[String]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            TrackerError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let config = self.repo.config()?;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                return Cred::credential_helper(&config, url, username_from_url);
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        debug!(remote = remote_name, ?refspecs, "pushing");
        remote.push(refspecs, Some(&mut push_options)).map_err(|e| {
            if e.class() == git2::ErrorClass::Net {
                TrackerError::remote(format!("Network error during push: {}", e))
            } else {
                TrackerError::Git(e)
            }
        })?;

        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn checkout(&self, branch: &str, create_from: Option<&str>) -> Result<()> {
        let reference = match create_from {
            Some(base) => {
                let base_commit = self
                    .repo
                    .find_branch(base, BranchType::Local)
                    .map_err(|e| {
                        TrackerError::branch(format!("Cannot find branch '{}': {}", base, e))
                    })?
                    .get()
                    .peel_to_commit()?;

                debug!(branch, base, "creating branch");
                self.repo.branch(branch, &base_commit, false)?.into_reference()
            }
            None => self
                .repo
                .find_branch(branch, BranchType::Local)
                .map_err(|e| {
                    TrackerError::branch(format!("Cannot find branch '{}': {}", branch, e))
                })?
                .into_reference(),
        };

        let ref_name = reference
            .name()
            .ok_or_else(|| TrackerError::branch(format!("Branch '{}' has no valid name", branch)))?
            .to_string();
        let target = reference.peel(ObjectType::Commit)?;

        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
        self.repo.set_head(&ref_name)?;

        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str, set_upstream: bool) -> Result<()> {
        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        self.push_refspecs(remote, &[refspec])?;

        if set_upstream {
            let mut config = self.repo.config()?;
            config.set_str(&format!("branch.{}.remote", branch), remote)?;
            config.set_str(
                &format!("branch.{}.merge", branch),
                &format!("refs/heads/{}", branch),
            )?;
        }

        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        let refspecs: Vec<String> = tag_names
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();

        self.push_refspecs(remote, &refspecs)
    }

    fn commit(&self, paths: &[&Path], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?;
        debug!(%oid, "created commit");

        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel(ObjectType::Commit)?;
        let signature = self.repo.signature()?;

        self.repo.tag(name, &head, &signature, message, false)?;

        Ok(())
    }

    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("Repository has no working directory").into())
    }
}
