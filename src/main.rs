use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use image_release_tracker::cli::{run_track_workflow, TrackWorkflowArgs, WorkflowOutcome};
use image_release_tracker::config;
use image_release_tracker::git::Git2Repository;
use image_release_tracker::registry::RegistryClient;
use image_release_tracker::ui;

#[derive(clap::Parser)]
#[command(
    name = "image-release-tracker",
    about = "Publish a release branch, commit and tag for every new upstream image release"
)]
struct Args {
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Process at most this many releases, oldest first"
    )]
    max_releases: Option<u32>,

    #[arg(short, long, help = "Only list the new releases and exit")]
    list: bool,

    #[arg(
        short = 'n',
        long,
        help = "Preview what would happen without making changes"
    )]
    dry_run: bool,

    #[arg(long, help = "Registry bearer token (skips the token request)")]
    token: Option<String>,

    #[arg(long, help = "Registry base URL")]
    index_url: Option<String>,

    #[arg(long, help = "Registry auth service base URL")]
    auth_url: Option<String>,

    #[arg(long, help = "HTTP timeout in seconds (default: none)")]
    timeout: Option<u64>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short = 'C', long, default_value = ".", help = "Path to the repository")]
    repo: PathBuf,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("image-release-tracker {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<WorkflowOutcome> {
    let mut config = config::load_config(args.config.as_deref())?;

    if let Some(index_url) = args.index_url {
        config.registry.index_url = index_url;
    }
    if let Some(auth_url) = args.auth_url {
        config.registry.auth_url = auth_url;
    }
    if args.timeout.is_some() {
        config.registry.timeout_secs = args.timeout;
    }

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Not in a git repository: {}", args.repo.display()))?;
    let registry = RegistryClient::new(&config.registry)?.with_token(args.token);

    let workflow_args = TrackWorkflowArgs {
        max_releases: args.max_releases.map(|n| n as usize),
        list_only: args.list,
        dry_run: args.dry_run,
    };

    let outcome = run_track_workflow(&workflow_args, &config, &repo, &registry)?;

    if let WorkflowOutcome::Published(published) = &outcome {
        let verb = if args.dry_run { "Would publish" } else { "Published" };
        println!(
            "\n\x1b[32m✓\x1b[0m {} {} release(s)\n",
            verb,
            published.len()
        );
    }

    Ok(outcome)
}
