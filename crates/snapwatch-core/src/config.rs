//! Watch-list configuration.
//!
//! The config document is a JSON object mapping snap name to source
//! metadata, e.g. `{"edgex-device-mqtt": {"GithubRepo": "canonical/..."}}`.
//! It can live on disk or behind an HTTP URL; either way it is loaded once
//! at startup and read-only afterwards.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::info;

use crate::Result;

/// Source metadata for a single watched snap.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SnapSource {
    /// GitHub repository running the snap's CI, as "owner/repo".
    #[serde(rename = "GithubRepo")]
    pub github_repo: String,
}

/// The full watch list, keyed by snap name.
///
/// A `BTreeMap` keeps iteration in sorted name order so repeated runs
/// render the table identically.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WatchConfig {
    pub snaps: BTreeMap<String, SnapSource>,
}

impl WatchConfig {
    /// Snaps to process, honouring an optional name filter.
    ///
    /// A filter that matches no configured snap yields an empty selection;
    /// the caller then renders an empty table rather than erroring.
    pub fn select<'a>(
        &'a self,
        only: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a str, &'a SnapSource)> {
        self.snaps
            .iter()
            .filter(move |(name, _)| only.map_or(true, |o| o == name.as_str()))
            .map(|(name, source)| (name.as_str(), source))
    }
}

/// Load the watch list from an HTTP URL or a local file path.
pub async fn load_config(source: &str) -> Result<WatchConfig> {
    let body = if source.starts_with("http") {
        info!("fetching config from {}", source);
        reqwest::get(source).await?.text().await?
    } else {
        info!("reading config from {}", source);
        std::fs::read_to_string(source)?
    };

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "edgex-device-mqtt": {"GithubRepo": "edgexfoundry/device-mqtt-go"},
        "edgexfoundry": {"GithubRepo": "edgexfoundry/edgex-go"}
    }"#;

    #[test]
    fn test_config_decodes_github_repo() {
        let config: WatchConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.snaps.len(), 2);
        assert_eq!(
            config.snaps["edgexfoundry"].github_repo,
            "edgexfoundry/edgex-go"
        );
    }

    #[test]
    fn test_config_rejects_missing_repo() {
        let result: std::result::Result<WatchConfig, _> =
            serde_json::from_str(r#"{"foo": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_all_sorted() {
        let config: WatchConfig = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<&str> = config.select(None).map(|(name, _)| name).collect();
        assert_eq!(names, vec!["edgex-device-mqtt", "edgexfoundry"]);
    }

    #[test]
    fn test_select_single_snap() {
        let config: WatchConfig = serde_json::from_str(SAMPLE).unwrap();
        let selected: Vec<_> = config.select(Some("edgexfoundry")).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, "edgexfoundry");
    }

    #[test]
    fn test_select_unknown_snap_is_empty() {
        let config: WatchConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.select(Some("no-such-snap")).count(), 0);
    }

    #[tokio::test]
    async fn test_load_local_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.snaps.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = load_config("/nonexistent/config.json").await;
        assert!(matches!(result, Err(crate::WatchError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = load_config(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(crate::WatchError::Json(_))));
    }
}
