//! Snapwatch: release, build, and CI status board for watched snaps.
//!
//! For every snap in the watch list, queries the Snap Store for its channel
//! map, the Launchpad build farm for recent build results, and GitHub
//! Actions for recent pull-request workflow runs, then prints one merged
//! status table.
//!
//! Calls are issued one snap at a time, one API at a time. Store and
//! build-farm failures abort the run; only a GitHub soft error (rate
//! limiting) is tolerated.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use snapwatch_core::{
    init_tracing, load_config, GithubClient, LaunchpadClient, RevisionStatusMap, SnapReport,
    StatusTable, StoreClient, WorkflowHealth,
};

/// Default watch list, maintained alongside the snaps it tracks.
const DEFAULT_CONFIG_URL: &str =
    "https://raw.githubusercontent.com/canonical/edgex-snap-info/main/config.json";

#[derive(Parser)]
#[command(name = "snapwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Release, build, and CI status board for watched snaps", long_about = None)]
struct Cli {
    /// URL or local path of the watch-list config file
    #[arg(long, default_value = DEFAULT_CONFIG_URL)]
    conf: String,

    /// Only report on this snap
    #[arg(long)]
    snap: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let config = load_config(&cli.conf)
        .await
        .with_context(|| format!("failed to load config from {}", cli.conf))?;

    let http = reqwest::Client::builder()
        .user_agent(snapwatch_core::USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let store = StoreClient::new(http.clone());
    let launchpad = LaunchpadClient::new(http.clone());
    let github = GithubClient::new(http);

    let mut table = StatusTable::new();

    for (name, source) in config.select(cli.snap.as_deref()) {
        info!("⏬ {}", name);

        let snap_info = store
            .snap_info(name)
            .await
            .with_context(|| format!("failed to query snap store for {}", name))?;

        let builds = launchpad
            .recent_builds(name)
            .await
            .with_context(|| format!("failed to query launchpad for {}", name))?;
        let revisions = RevisionStatusMap::from_entries(&builds.entries);

        let runs = github
            .recent_runs(&source.github_repo)
            .await
            .with_context(|| {
                format!("failed to query workflow runs for {}", source.github_repo)
            })?;
        let health = WorkflowHealth::summarize(&runs.workflow_runs);

        table.push(&SnapReport::assemble(name, &snap_info, &revisions, &health));
    }

    print!("{}", table.render());

    Ok(())
}
