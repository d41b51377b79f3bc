// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use git2::{Repository, RepositoryInitOptions};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn tracker() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-release-tracker"))
}

/// A repository on "master" whose only commit is tagged `1.2.3-ce.0`
fn setup_tagged_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = Repository::init_opts(temp_dir.path(), &opts).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    fs::write(temp_dir.path().join("README.md"), "# image\n").unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new("README.md")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = repo.signature().unwrap();
    let commit_id = repo
        .commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])
        .unwrap();
    repo.tag_lightweight(
        "1.2.3-ce.0",
        &repo.find_object(commit_id, None).unwrap(),
        false,
    )
    .unwrap();

    temp_dir
}

fn run_against_registry(repo_dir: &Path, server: &MockServer, extra: &[&str]) -> Output {
    tracker()
        .current_dir(repo_dir)
        .arg("--repo")
        .arg(repo_dir)
        .args(["--token", "test-token", "--index-url"])
        .arg(server.base_url())
        .args(extra)
        .output()
        .expect("Failed to execute command")
}

fn local_tags(repo_dir: &Path) -> Vec<String> {
    let repo = Repository::open(repo_dir).unwrap();
    let tags = repo.tag_names(None).unwrap();
    tags.iter().flatten().map(str::to_string).collect()
}

#[test]
fn test_help() {
    let output = tracker()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("image-release-tracker"));
    assert!(stdout.contains("--max-releases"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--list"));
    assert!(stdout.contains("--token"));
}

#[test]
fn test_version() {
    let output = tracker()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("image-release-tracker "));
}

#[test]
fn test_zero_max_releases_is_rejected() {
    let output = tracker()
        .args(["--max-releases", "0"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = tracker()
        .arg("--repo")
        .arg(temp_dir.path())
        .args(["--token", "unused", "--index-url", "http://127.0.0.1:9"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Not in a git repository"));
}

#[test]
fn test_no_new_releases_exits_with_distinct_code() {
    let repo_dir = setup_tagged_repo();
    let server = MockServer::start();
    let tags_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/gitlab/gitlab-ce/tags/list")
            .header("Authorization", "Bearer test-token");
        then.status(200)
            .json_body(json!({ "name": "gitlab/gitlab-ce", "tags": ["latest", "1.2.3-ce.0"] }));
    });

    let output = run_against_registry(repo_dir.path(), &server, &[]);

    tags_mock.assert();
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No new releases"), "stderr: {}", stderr);
    assert!(!repo_dir.path().join("Dockerfile").exists());
    assert_eq!(local_tags(repo_dir.path()), vec!["1.2.3-ce.0"]);
}

#[test]
fn test_list_exits_successfully_without_changes() {
    let repo_dir = setup_tagged_repo();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/gitlab/gitlab-ce/tags/list");
        then.status(200).json_body(json!({
            "name": "gitlab/gitlab-ce",
            "tags": ["1.2.3-ce.0", "1.2.4-ce.0", "1.3.0-ce.0"]
        }));
    });

    let output = run_against_registry(repo_dir.path(), &server, &["--list"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("1.2.4-ce.0"));
    assert!(stdout.contains("1.3.0-ce.0"));
    assert!(!repo_dir.path().join("Dockerfile").exists());
    assert_eq!(local_tags(repo_dir.path()), vec!["1.2.3-ce.0"]);
}
