//! Selection of registry releases missing from the local repository

pub mod release_selector;

pub use release_selector::{limit_releases, ReleaseSelector};
