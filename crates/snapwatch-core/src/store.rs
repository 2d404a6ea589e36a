//! Snap Store client.
//!
//! Fetches per-channel release information from the public snapd REST API.
//! The v2 info endpoint serves several device series and requires a header
//! selecting series 16.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::Result;

/// Production Snap Store info endpoint.
pub const SNAP_STORE_URL: &str = "https://api.snapcraft.io/v2/snaps/info";

/// Required device-series header, name and value.
pub const DEVICE_SERIES_HEADER: (&str, &str) = ("Snap-Device-Series", "16");

/// Release line a channel-map entry belongs to.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub architecture: String,
    pub track: String,
    pub risk: String,
    #[serde(rename = "released-at")]
    pub released_at: DateTime<Utc>,
}

/// One entry of the store's channel map.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChannelMapEntry {
    pub channel: Channel,
    pub revision: u32,
    pub version: String,
}

/// Store response for a single snap.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SnapInfo {
    #[serde(rename = "channel-map", default)]
    pub channel_map: Vec<ChannelMapEntry>,
}

/// Client for the Snap Store info endpoint.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client against the production endpoint.
    pub fn new(http: reqwest::Client) -> Self {
        StoreClient {
            http,
            base_url: SNAP_STORE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the channel map for `name`.
    pub async fn snap_info(&self, name: &str) -> Result<SnapInfo> {
        debug!("querying snap store for {}", name);
        let url = format!("{}/{}", self.base_url, name);
        let body = self
            .http
            .get(&url)
            .header(DEVICE_SERIES_HEADER.0, DEVICE_SERIES_HEADER.1)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}
