use std::collections::HashSet;

use crate::domain::ReleaseVersion;
use crate::error::{Result, TrackerError};

/// Picks the registry releases that are missing from the local repository
pub struct ReleaseSelector {
    baseline: ReleaseVersion,
    known_tags: HashSet<String>,
}

impl ReleaseSelector {
    /// Build a selector from the repository's tag names.
    ///
    /// The baseline is the highest tag matching the release pattern; tags
    /// that don't match are still remembered as "known". Among tags with
    /// equal numbers the first one listed wins.
    ///
    /// # Returns
    /// * `Ok(ReleaseSelector)` - With the highest local release as baseline
    /// * `Err(TrackerError::NoBaseline)` - If no local tag is a release
    pub fn from_local_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();

        let mut baseline: Option<ReleaseVersion> = None;
        for version in tags.iter().filter_map(|tag| ReleaseVersion::parse(tag)) {
            match &baseline {
                Some(current) if !version.is_newer_than(current) => {}
                _ => baseline = Some(version),
            }
        }

        Ok(ReleaseSelector {
            baseline: baseline.ok_or(TrackerError::NoBaseline)?,
            known_tags: tags.into_iter().collect(),
        })
    }

    /// Highest release already tagged locally
    pub fn baseline(&self) -> &ReleaseVersion {
        &self.baseline
    }

    pub fn is_known(&self, tag: &str) -> bool {
        self.known_tags.contains(tag)
    }

    /// Registry tags that are releases, not tagged locally and newer than the
    /// baseline, in ascending order
    pub fn select<'a, I>(&self, remote_tags: I) -> Vec<ReleaseVersion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selected: Vec<ReleaseVersion> = Vec::new();

        for tag in remote_tags {
            if self.is_known(tag) {
                continue;
            }
            let Some(version) = ReleaseVersion::parse(tag) else {
                continue;
            };
            if version.is_newer_than(&self.baseline) && !selected.contains(&version) {
                selected.push(version);
            }
        }

        selected.sort_by_key(ReleaseVersion::sort_key);
        selected
    }
}

/// Keep at most `max` releases, oldest first
pub fn limit_releases(mut releases: Vec<ReleaseVersion>, max: Option<usize>) -> Vec<ReleaseVersion> {
    if let Some(max) = max {
        releases.truncate(max);
    }
    releases
}
