//! Launchpad build-farm client.
//!
//! Fetches the most recent build records for a snap recipe and condenses
//! them into a revision → marker lookup for the status table.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::Result;

/// Production Launchpad API endpoint.
pub const LAUNCHPAD_URL: &str = "https://api.launchpad.net/devel";

/// Launchpad team owning the snap recipes.
pub const LAUNCHPAD_OWNER: &str = "~canonical-edgex";

/// How many of the most recent builds to inspect.
pub const BUILD_PAGE_SIZE: usize = 10;

/// Build state of a completed, uploaded build.
pub const BUILT_STATE: &str = "Successfully built";

/// Marker attached to revisions with a successful build.
pub const BUILD_MARK: &str = "✅";

/// One build record from the farm.
///
/// `store_upload_revision` is absent when the build failed, is still
/// pending, or the artifact upload never happened.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BuildEntry {
    #[serde(default)]
    pub store_upload_revision: Option<u32>,
    #[serde(rename = "buildstate", alias = "BuildState", default)]
    pub build_state: String,
}

/// One page of build records, newest first.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BuildPage {
    #[serde(default)]
    pub entries: Vec<BuildEntry>,
}

/// Lookup from store revision to its build marker.
///
/// Rebuilt from scratch for every snap; never persisted.
#[derive(Debug, Default)]
pub struct RevisionStatusMap {
    marks: HashMap<u32, &'static str>,
}

impl RevisionStatusMap {
    /// Collect markers from build entries.
    ///
    /// Only entries carrying both a store revision and the
    /// "Successfully built" state contribute; failed, pending, and
    /// revision-less builds leave no mark. Duplicate revisions keep the
    /// last successful entry seen; the API guarantees no ordering here.
    pub fn from_entries(entries: &[BuildEntry]) -> Self {
        let mut marks = HashMap::new();
        for entry in entries {
            if let Some(revision) = entry.store_upload_revision {
                if entry.build_state == BUILT_STATE {
                    marks.insert(revision, BUILD_MARK);
                }
            }
        }

        RevisionStatusMap { marks }
    }

    /// Marker for `revision`, or the empty string when no successful build
    /// is known.
    pub fn mark(&self, revision: u32) -> &'static str {
        self.marks.get(&revision).copied().unwrap_or("")
    }

    /// Number of revisions with a successful build.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Client for the Launchpad build-farm API.
pub struct LaunchpadClient {
    http: reqwest::Client,
    base_url: String,
}

impl LaunchpadClient {
    /// Create a client against the production endpoint.
    pub fn new(http: reqwest::Client) -> Self {
        LaunchpadClient {
            http,
            base_url: LAUNCHPAD_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the most recent builds for `name`, newest first.
    pub async fn recent_builds(&self, name: &str) -> Result<BuildPage> {
        debug!("querying launchpad builds for {}", name);
        let url = format!(
            "{}/{}/+snap/{}/builds?ws.size={}&direction=backwards&memo=0",
            self.base_url, LAUNCHPAD_OWNER, name, BUILD_PAGE_SIZE
        );
        let body = self.http.get(&url).send().await?.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}
