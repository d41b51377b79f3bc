//! Main workflow orchestration logic
//!
//! Runs the release tracking pipeline once: local baseline, registry tags,
//! selection, then publishing. Kept apart from argument parsing so it can be
//! called programmatically without depending on clap.

use tracing::info;

use crate::analyzer::{limit_releases, ReleaseSelector};
use crate::boundary::BoundaryWarning;
use crate::cli::apply::{PublishedRelease, ReleaseApplier};
use crate::config::Config;
use crate::domain::{BuildTemplate, ReleaseVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::registry::TagSource;
use crate::ui;

/// Exit status when the registry has nothing newer than the local baseline
pub const EXIT_NO_NEW_RELEASES: i32 = 3;

/// Arguments for the tracking workflow
///
/// Mirrors the CLI flags that shape the run; registry and repository
/// settings come from [Config].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackWorkflowArgs {
    /// Process at most this many releases, oldest first
    pub max_releases: Option<usize>,

    /// Print the selected releases and stop
    pub list_only: bool,

    /// Describe mutating steps instead of performing them
    pub dry_run: bool,
}

/// Result of a tracking run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Nothing newer than the baseline is published
    NoNewReleases { baseline: ReleaseVersion },

    /// List-only run; nothing was changed
    Listed {
        baseline: ReleaseVersion,
        releases: Vec<ReleaseVersion>,
    },

    /// Releases that were published (or described, in dry-run mode)
    Published(Vec<PublishedRelease>),
}

impl WorkflowOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkflowOutcome::NoNewReleases { .. } => EXIT_NO_NEW_RELEASES,
            WorkflowOutcome::Listed { .. } | WorkflowOutcome::Published(_) => 0,
        }
    }
}

/// Main tracking workflow
///
/// Orchestrates the whole run:
/// 1. Find the highest local release and its edition
/// 2. Fetch the registry tags for that edition's image
/// 3. Select the missing, newer releases in ascending order
/// 4. List them, or publish them (at most `max_releases`)
///
/// Any error aborts the run; releases already published stay published.
pub fn run_track_workflow<R, S>(
    args: &TrackWorkflowArgs,
    config: &Config,
    repo: &R,
    registry: &S,
) -> Result<WorkflowOutcome>
where
    R: Repository,
    S: TagSource,
{
    let selector = ReleaseSelector::from_local_tags(repo.list_tags()?)?;
    let baseline = selector.baseline().clone();
    let image = config.images.image_for(baseline.edition());

    info!(%baseline, image, "resolved local baseline");
    ui::display_status(&format!("Latest local release: {} ({})", baseline, image));

    let remote_tags = registry.list_tags(image)?;
    info!(count = remote_tags.len(), image, "fetched registry tags");

    let releases = selector.select(remote_tags.iter().map(String::as_str));

    if releases.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::NoNewReleases {
            baseline: baseline.to_string(),
            image: image.to_string(),
        });
        return Ok(WorkflowOutcome::NoNewReleases { baseline });
    }

    if args.list_only {
        ui::display_release_list(&baseline, &releases);
        return Ok(WorkflowOutcome::Listed { baseline, releases });
    }

    if let Some(limit) = args.max_releases {
        if releases.len() > limit {
            ui::display_boundary_warning(&BoundaryWarning::ReleasesTruncated {
                selected: releases.len(),
                limit,
                deferred_from: releases[limit].to_string(),
            });
        }
    }
    let releases = limit_releases(releases, args.max_releases);

    let template = BuildTemplate::load(config.repository.template.as_deref())?;
    let mut applier =
        ReleaseApplier::new(repo, &config.repository, image, &template, args.dry_run)?;

    let mut published = Vec::with_capacity(releases.len());
    for release in &releases {
        published.push(applier.apply(release)?);
    }

    Ok(WorkflowOutcome::Published(published))
}
