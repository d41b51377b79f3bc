//! User interface module - everything the tool prints for the user.
//!
//! Diagnostics go through `tracing`; this module is the human-facing output.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_dry_run_step, display_error, display_release_list,
    display_rendered_file, display_status, display_success, format_release_list,
};
