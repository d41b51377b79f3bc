//! Release tracking workflow behind the command line

pub mod apply;
pub mod orchestration;

pub use apply::{PublishedRelease, ReleaseApplier};
pub use orchestration::{
    run_track_workflow, TrackWorkflowArgs, WorkflowOutcome, EXIT_NO_NEW_RELEASES,
};
