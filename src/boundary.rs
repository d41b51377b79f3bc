use std::fmt;

/// Non-fatal conditions met while selecting releases.
/// These are reported to the user but don't fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The registry has nothing newer than the local baseline
    NoNewReleases { baseline: String, image: String },
    /// More releases are missing than the configured maximum
    ReleasesTruncated {
        selected: usize,
        limit: usize,
        deferred_from: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewReleases { baseline, image } => {
                write!(
                    f,
                    "No new releases of '{}' since '{}'",
                    image, baseline
                )
            }
            BoundaryWarning::ReleasesTruncated {
                selected,
                limit,
                deferred_from,
            } => {
                write!(
                    f,
                    "{} new releases found, processing the oldest {} (deferring from '{}')",
                    selected, limit, deferred_from
                )
            }
        }
    }
}
