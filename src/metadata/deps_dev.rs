//! Fetch OpenSSF Scorecard checks for a package from deps.dev

use crate::config::SourceConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::scoring::merge_check;
use crate::types::CheckScores;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PackageVersionResponse {
    version: VersionInfo,
}

/// Projects stay raw so one malformed entry does not hide the others
#[derive(Debug, Deserialize)]
struct VersionInfo {
    projects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ScorecardCheck {
    name: String,
    score: f64,
}

/// Fetch the scorecard checks deps.dev reports for a package.
///
/// Returns `Ok(None)` when deps.dev has no usable data: a status other than
/// 200, or a body without a `version.projects` list. Checks from the linked
/// projects are max-merged in order and negative scores are dropped. The
/// first malformed project or check ends the merge; checks merged before it
/// are kept.
pub async fn fetch_package_checks(
    client: &HttpClient,
    sources: &SourceConfig,
    package: &str,
) -> Result<Option<CheckScores>> {
    let url = sources.scorecard_url(package);
    let response = client.get(&url).await?;

    if response.status() != StatusCode::OK {
        debug!("No scorecard data for {}: HTTP {}", package, response.status());
        return Ok(None);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Could not read deps.dev response for {}: {}", package, e);
            return Ok(None);
        }
    };

    Ok(parse_checks(package, &body))
}

fn parse_checks(package: &str, body: &str) -> Option<CheckScores> {
    let data: PackageVersionResponse = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            debug!("Malformed deps.dev response for {}: {}", package, e);
            return None;
        }
    };

    let mut checks = CheckScores::new();
    for project in &data.version.projects {
        if let Err(reason) = merge_project(&mut checks, project) {
            debug!("Stopped reading deps.dev projects for {}: {}", package, reason);
            break;
        }
    }
    Some(checks)
}

/// Merge one project's scorecard checks. Projects without a scorecard add nothing.
fn merge_project(checks: &mut CheckScores, project: &Value) -> std::result::Result<(), String> {
    let Some(scorecard) = project.get("scorecardV2") else {
        return Ok(());
    };
    let list = scorecard
        .get("check")
        .and_then(Value::as_array)
        .ok_or_else(|| "scorecardV2 has no check list".to_string())?;

    for raw in list {
        let check = ScorecardCheck::deserialize(raw).map_err(|e| e.to_string())?;
        merge_check(checks, &check.name, check.score);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    const TWO_PROJECTS: &str = r#"{
        "version": {
            "projects": [
                {
                    "type": "GITHUB",
                    "name": "psf/requests",
                    "scorecardV2": {
                        "date": "2024-04-29",
                        "check": [
                            {"name": "Code-Review", "score": 4},
                            {"name": "Fuzzing", "score": -1},
                            {"name": "License", "score": 10}
                        ]
                    }
                },
                {"type": "GITHUB", "name": "psf/requests-docs"},
                {
                    "type": "GITHUB",
                    "name": "psf/requests-mirror",
                    "scorecardV2": {
                        "check": [
                            {"name": "Code-Review", "score": 7},
                            {"name": "License", "score": 2}
                        ]
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_merges_projects() {
        let checks = parse_checks("requests", TWO_PROJECTS).unwrap();

        assert_eq!(checks.len(), 2);
        assert_eq!(checks["Code-Review"], Some(7.0));
        assert_eq!(checks["License"], Some(10.0));
        assert!(!checks.contains_key("Fuzzing"));
    }

    #[test]
    fn test_parse_without_scorecards_is_empty() {
        let checks = parse_checks("tiny", r#"{"version": {"projects": []}}"#).unwrap();
        assert!(checks.is_empty());
    }

    #[test]
    fn test_parse_malformed_is_none() {
        assert!(parse_checks("broken", r#"{"version": {}}"#).is_none());
        assert!(parse_checks("broken", r#"{"version": null}"#).is_none());
        assert!(parse_checks("broken", "not json").is_none());
    }

    #[test]
    fn test_parse_keeps_checks_before_malformed_project() {
        let body = r#"{"version": {"projects": [
            {"scorecardV2": {"check": [{"name": "License", "score": 10}]}},
            {"scorecardV2": {"date": "2024-01-01"}},
            {"scorecardV2": {"check": [{"name": "Fuzzing", "score": 10}]}}
        ]}}"#;

        let checks = parse_checks("pkg", body).unwrap();

        assert_eq!(checks.len(), 1);
        assert_eq!(checks["License"], Some(10.0));
    }

    #[test]
    fn test_parse_keeps_checks_before_malformed_check() {
        let body = r#"{"version": {"projects": [
            {"scorecardV2": {"check": [
                {"name": "Code-Review", "score": 6},
                {"score": 3},
                {"name": "Maintained", "score": 9}
            ]}}
        ]}}"#;

        let checks = parse_checks("pkg", body).unwrap();

        assert_eq!(checks.len(), 1);
        assert_eq!(checks["Code-Review"], Some(6.0));
    }

    #[tokio::test]
    async fn test_fetch_package_checks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/_/s/pypi/p/requests/v/")
            .with_status(200)
            .with_body(TWO_PROJECTS)
            .create_async()
            .await;
        let client = HttpClient::new(&NetworkConfig::default()).unwrap();
        let sources = SourceConfig {
            deps_dev_base: server.url(),
            ..SourceConfig::default()
        };

        let checks = fetch_package_checks(&client, &sources, "requests")
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(checks["Code-Review"], Some(7.0));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/_/s/pypi/p/unknown-pkg/v/")
            .with_status(404)
            .create_async()
            .await;
        let client = HttpClient::new(&NetworkConfig::default()).unwrap();
        let sources = SourceConfig {
            deps_dev_base: server.url(),
            ..SourceConfig::default()
        };

        let result = fetch_package_checks(&client, &sources, "unknown-pkg").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/_/s/pypi/p/requests/v/")
            .with_status(203)
            .with_body(TWO_PROJECTS)
            .create_async()
            .await;
        let client = HttpClient::new(&NetworkConfig::default()).unwrap();
        let sources = SourceConfig {
            deps_dev_base: server.url(),
            ..SourceConfig::default()
        };

        let result = fetch_package_checks(&client, &sources, "requests").await.unwrap();

        assert!(result.is_none());
    }
}
