//! Per-snap report assembly.
//!
//! Joins the store channel map with the build-marker lookup and the CI
//! summary into the rows the status table renders. Assembly is pure; all
//! fetching happens before this point.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::WorkflowHealth;
use crate::launchpad::RevisionStatusMap;
use crate::store::SnapInfo;

/// Timestamp layout for the Date column, e.g. "Jan 17 14:37:49".
const DATE_FORMAT: &str = "%b %e %H:%M:%S";

/// One channel line of the table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelRow {
    pub name: String,
    /// "track/risk", e.g. "latest/stable".
    pub channel: String,
    pub version: String,
    pub architecture: String,
    pub revision: u32,
    pub released_at: String,
    /// "✅" when a successful build is known for the revision, else empty.
    pub build_mark: String,
}

/// Everything the table needs for one snap block: its channel rows plus
/// the CI summary line that follows them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SnapReport {
    pub rows: Vec<ChannelRow>,
    pub summary: String,
}

impl SnapReport {
    /// Join store channels with build markers and the CI summary.
    pub fn assemble(
        name: &str,
        info: &SnapInfo,
        builds: &RevisionStatusMap,
        health: &WorkflowHealth,
    ) -> Self {
        let rows = info
            .channel_map
            .iter()
            .map(|entry| ChannelRow {
                name: name.to_string(),
                channel: format!("{}/{}", entry.channel.track, entry.channel.risk),
                version: entry.version.clone(),
                architecture: entry.channel.architecture.clone(),
                revision: entry.revision,
                released_at: format_release_date(&entry.channel.released_at),
                build_mark: builds.mark(entry.revision).to_string(),
            })
            .collect();

        let summary = format!(
            "{} failed {}/{}",
            health.marker().icon(),
            health.failed_runs,
            health.total_test_runs
        );

        SnapReport { rows, summary }
    }
}

fn format_release_date(ts: &DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}
