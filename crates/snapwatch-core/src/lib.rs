//! Snapwatch Core Library
//!
//! Fetch-merge-render pipeline for snap release and build-health status.
//! The Snap Store supplies per-channel release data, the Launchpad build
//! farm supplies recent build results, and GitHub Actions supplies recent
//! workflow runs; one status table row per channel plus a CI summary line
//! per snap come out the other end.

pub mod config;
pub mod error;
pub mod github;
pub mod launchpad;
pub mod render;
pub mod report;
pub mod store;
pub mod telemetry;

pub use config::{load_config, SnapSource, WatchConfig};
pub use error::{Result, WatchError};
pub use github::{GithubClient, HealthMarker, WorkflowHealth, WorkflowRun, WorkflowRuns};
pub use launchpad::{BuildEntry, BuildPage, LaunchpadClient, RevisionStatusMap};
pub use render::StatusTable;
pub use report::{ChannelRow, SnapReport};
pub use store::{Channel, ChannelMapEntry, SnapInfo, StoreClient};
pub use telemetry::init_tracing;

/// Snapwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent presented to every upstream API.
pub const USER_AGENT: &str = concat!("snapwatch/", env!("CARGO_PKG_VERSION"));
