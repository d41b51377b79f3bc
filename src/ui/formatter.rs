//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic. Functions here only
//! print; `format_*` helpers build the text so it can be tested.

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseVersion;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Print a step that dry-run mode skipped.
pub fn display_dry_run_step(description: &str) {
    println!("  \x1b[36m[dry-run]\x1b[0m {}", description);
}

/// Build the listing of releases that would be published.
///
/// # Arguments
/// * `baseline` - Highest release already tagged locally
/// * `releases` - Selected releases in ascending order
pub fn format_release_list(baseline: &ReleaseVersion, releases: &[ReleaseVersion]) -> String {
    let mut out = format!(
        "New releases since {} ({}):\n",
        baseline,
        releases.len()
    );
    for release in releases {
        out.push_str(&format!("  - {}\n", release));
    }
    out
}

/// Display the releases selected for publishing.
pub fn display_release_list(baseline: &ReleaseVersion, releases: &[ReleaseVersion]) {
    print!("\n\x1b[1m{}\x1b[0m", format_release_list(baseline, releases));
}

/// Display the generated build definition in place of writing it.
pub fn display_rendered_file(path: &str, contents: &str) {
    println!("  \x1b[36m[dry-run]\x1b[0m would write {}:", path);
    for line in contents.lines() {
        println!("    | {}", line);
    }
}
