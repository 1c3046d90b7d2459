//! End-to-end collection against mocked catalog and deps.dev endpoints

use indicatif::ProgressBar;
use pypi_scorecards::{collect_scorecards, NetworkConfig, ScorecardConfig, ScorecardError, SourceConfig};

fn config_for(server_url: &str) -> ScorecardConfig {
    ScorecardConfig::builder()
        .sources(SourceConfig {
            catalog_url: format!("{}/catalog.json", server_url),
            deps_dev_base: server_url.to_string(),
            ..SourceConfig::default()
        })
        .network(NetworkConfig {
            max_retries: 0,
            ..NetworkConfig::default()
        })
        .build()
}

#[tokio::test]
async fn test_collect_scorecards_ranks_and_fills() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/catalog.json")
        .with_status(200)
        .with_body(
            r#"{"rows": [
                {"project": "alpha", "download_count": 100},
                {"project": "beta", "download_count": 50},
                {"project": "gamma", "download_count": 1000},
                {"project": "delta", "download_count": 7}
            ]}"#,
        )
        .create_async()
        .await;
    for (name, body) in [
        ("alpha", r#"{"version": {"projects": [{"scorecardV2": {"check": [{"name": "A", "score": 8}, {"name": "B", "score": 8}]}}]}}"#),
        ("beta", r#"{"version": {"projects": [{"scorecardV2": {"check": [{"name": "A", "score": 8}, {"name": "B", "score": 8}]}}]}}"#),
        ("gamma", r#"{"version": {"projects": [{"scorecardV2": {"check": [{"name": "B", "score": 10}, {"name": "A", "score": -1}]}}]}}"#),
    ] {
        server
            .mock("GET", format!("/_/s/pypi/p/{}/v/", name).as_str())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
    }
    server
        .mock("GET", "/_/s/pypi/p/delta/v/")
        .with_status(404)
        .create_async()
        .await;

    let report = collect_scorecards(&config_for(&server.url()), &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(report.check_names, vec!["A", "B"]);
    let order: Vec<_> = report.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["alpha", "beta", "gamma", "delta"]);

    for package in &report.packages {
        assert_eq!(package.checks.len(), report.check_names.len());
    }
    let gamma = &report.packages[2];
    assert_eq!(gamma.checks["A"], None);
    assert!((gamma.overall - 5.0).abs() < 1e-9);
    let delta = &report.packages[3];
    assert_eq!(delta.overall, 0.0);
    assert!(delta.checks.values().all(Option::is_none));
}

#[tokio::test]
async fn test_collect_scorecards_fails_without_catalog() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/catalog.json")
        .with_status(200)
        .with_body("<html>rate limited</html>")
        .create_async()
        .await;

    let result = collect_scorecards(&config_for(&server.url()), &ProgressBar::hidden()).await;

    assert!(matches!(result, Err(ScorecardError::JsonError(_))));
}
