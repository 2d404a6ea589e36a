//! GitHub Actions client and CI health summary.
//!
//! Counts recent pull-request workflow runs of the snap test workflow and
//! derives a traffic-light marker for the summary row.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::Result;

/// Production GitHub REST endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// How many of the most recent workflow runs to inspect.
pub const RUN_PAGE_SIZE: usize = 10;

/// Workflow whose runs count towards the test total.
pub const TEST_WORKFLOW: &str = "Snap Testing";

/// One workflow run.
///
/// `conclusion` is null while a run is still in flight.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorkflowRun {
    #[serde(alias = "Name", default)]
    pub name: String,
    #[serde(alias = "Conclusion", default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub display_title: String,
    #[serde(default)]
    pub html_url: String,
}

/// Workflow-runs response.
///
/// `message` is set instead of data when the API rejects the request (rate
/// limiting, unknown repository); the run list then decodes empty.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorkflowRuns {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
    #[serde(alias = "Message", default)]
    pub message: String,
}

/// CI traffic-light marker derived from the recent run window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthMarker {
    /// At least one recent run failed.
    Unhealthy,
    /// Test runs were found and none of the recent runs failed.
    Healthy,
    /// No test-workflow runs at all; likely a misconfigured workflow name
    /// or repository.
    Unknown,
}

impl HealthMarker {
    /// Icon rendered in the summary row.
    pub fn icon(&self) -> &'static str {
        match self {
            HealthMarker::Unhealthy => "🔴",
            HealthMarker::Healthy => "🟢",
            HealthMarker::Unknown => "🟠",
        }
    }
}

/// Aggregate CI health over the recent run window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowHealth {
    /// Runs of the test workflow, regardless of outcome.
    pub total_test_runs: u32,
    /// Failed runs of any workflow.
    pub failed_runs: u32,
}

impl WorkflowHealth {
    /// Count test-workflow runs and failures across `runs`, logging each
    /// failing run's title and URL.
    pub fn summarize(runs: &[WorkflowRun]) -> Self {
        let mut total_test_runs = 0;
        let mut failed_runs = 0;

        for run in runs {
            if run.name == TEST_WORKFLOW {
                total_test_runs += 1;
            }
            if run.conclusion.as_deref() == Some("failure") {
                failed_runs += 1;
                warn!("🔴 {} ({})", run.display_title, run.html_url);
            }
        }

        WorkflowHealth {
            total_test_runs,
            failed_runs,
        }
    }

    /// Marker policy: zero test runs is suspicious, zero failures is
    /// healthy, anything else is unhealthy.
    pub fn marker(&self) -> HealthMarker {
        if self.total_test_runs == 0 {
            HealthMarker::Unknown
        } else if self.failed_runs == 0 {
            HealthMarker::Healthy
        } else {
            HealthMarker::Unhealthy
        }
    }
}

/// Client for the GitHub Actions runs endpoint.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Create a client against the production endpoint.
    pub fn new(http: reqwest::Client) -> Self {
        GithubClient {
            http,
            base_url: GITHUB_API_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the most recent pull-request workflow runs for `repo`
    /// ("owner/repo").
    ///
    /// A soft API error (`message` body) is logged as a warning and the
    /// partial response returned, so one rate-limited repository does not
    /// abort the whole run.
    pub async fn recent_runs(&self, repo: &str) -> Result<WorkflowRuns> {
        debug!("querying github workflow runs for {}", repo);
        let url = format!(
            "{}/repos/{}/actions/runs?per_page={}&event=pull_request",
            self.base_url, repo, RUN_PAGE_SIZE
        );
        let body = self.http.get(&url).send().await?.text().await?;
        let runs: WorkflowRuns = serde_json::from_str(&body)?;

        if !runs.message.is_empty() {
            warn!("🟠 {}", runs.message);
        }

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, conclusion: Option<&str>) -> WorkflowRun {
        WorkflowRun {
            name: name.to_string(),
            conclusion: conclusion.map(String::from),
            display_title: format!("{} run", name),
            html_url: "https://github.com/org/repo/actions/runs/1".to_string(),
        }
    }

    #[test]
    fn test_total_counts_only_test_workflow() {
        let runs = vec![
            run(TEST_WORKFLOW, Some("success")),
            run(TEST_WORKFLOW, Some("success")),
            run("Build", Some("success")),
        ];
        let health = WorkflowHealth::summarize(&runs);
        assert_eq!(health.total_test_runs, 2);
        assert_eq!(health.failed_runs, 0);
    }

    #[test]
    fn test_failed_counts_any_workflow() {
        let runs = vec![
            run(TEST_WORKFLOW, Some("success")),
            run("Build", Some("failure")),
        ];
        let health = WorkflowHealth::summarize(&runs);
        assert_eq!(health.total_test_runs, 1);
        assert_eq!(health.failed_runs, 1);
    }

    #[test]
    fn test_in_flight_run_is_not_failed() {
        let runs = vec![run(TEST_WORKFLOW, None)];
        let health = WorkflowHealth::summarize(&runs);
        assert_eq!(health.failed_runs, 0);
    }

    #[test]
    fn test_marker_unknown_without_test_runs() {
        let health = WorkflowHealth {
            total_test_runs: 0,
            failed_runs: 3,
        };
        assert_eq!(health.marker(), HealthMarker::Unknown);
        assert_eq!(health.marker().icon(), "🟠");
    }

    #[test]
    fn test_marker_healthy_without_failures() {
        let health = WorkflowHealth {
            total_test_runs: 5,
            failed_runs: 0,
        };
        assert_eq!(health.marker(), HealthMarker::Healthy);
    }

    #[test]
    fn test_marker_unhealthy_with_failures() {
        let health = WorkflowHealth {
            total_test_runs: 5,
            failed_runs: 1,
        };
        assert_eq!(health.marker(), HealthMarker::Unhealthy);
    }

    #[test]
    fn test_runs_decode_wire_fields_and_null_conclusion() {
        let body = r#"{
            "total_count": 2,
            "workflow_runs": [
                {
                    "name": "Snap Testing",
                    "conclusion": "failure",
                    "display_title": "Fix channel join",
                    "html_url": "https://github.com/org/repo/actions/runs/42"
                },
                {
                    "name": "Build",
                    "conclusion": null,
                    "display_title": "Bump deps",
                    "html_url": "https://github.com/org/repo/actions/runs/43"
                }
            ]
        }"#;

        let runs: WorkflowRuns = serde_json::from_str(body).unwrap();
        assert_eq!(runs.workflow_runs.len(), 2);
        assert_eq!(runs.workflow_runs[0].conclusion.as_deref(), Some("failure"));
        assert_eq!(runs.workflow_runs[1].conclusion, None);
        assert!(runs.message.is_empty());
    }

    #[test]
    fn test_soft_error_message_decodes() {
        let body = r#"{"message": "API rate limit exceeded", "documentation_url": "https://docs.github.com"}"#;
        let runs: WorkflowRuns = serde_json::from_str(body).unwrap();
        assert!(runs.workflow_runs.is_empty());
        assert_eq!(runs.message, "API rate limit exceeded");
    }

    #[test]
    fn test_runs_accept_alias_field_casing() {
        let body = r#"{"workflow_runs": [{"Name": "Snap Testing", "Conclusion": "success"}]}"#;
        let runs: WorkflowRuns = serde_json::from_str(body).unwrap();
        assert_eq!(runs.workflow_runs[0].name, TEST_WORKFLOW);
        assert_eq!(runs.workflow_runs[0].conclusion.as_deref(), Some("success"));
    }
}
