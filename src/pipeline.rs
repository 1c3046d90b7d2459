//! Run orchestration: catalog, scorecard fan-out, aggregation, reports

use crate::config::{ScorecardConfig, SourceConfig};
use crate::error::Result;
use crate::http::HttpClient;
use crate::metadata::{fetch_catalog, fetch_package_checks};
use crate::report::{write_csv, write_markdown};
use crate::scoring::{check_union, fill_in_missing_checks, rank_packages};
use crate::types::{PackageSet, ReportSummary, ScorecardReport};
use chrono::Local;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Files written by a run and what went into them
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub summary: ReportSummary,
    pub csv_path: PathBuf,
    pub readme_path: PathBuf,
}

/// Collect scorecards for every catalog package and write both reports
pub async fn run(config: &ScorecardConfig, progress: &ProgressBar) -> Result<RunSummary> {
    let report = collect_scorecards(config, progress).await?;

    let csv_path = write_csv(&report, &config.output)?;
    let readme_path = write_markdown(&report, config)?;

    Ok(RunSummary {
        summary: report.summary(),
        csv_path,
        readme_path,
    })
}

/// Load the catalog, fetch every scorecard and return the ranked report
pub async fn collect_scorecards(
    config: &ScorecardConfig,
    progress: &ProgressBar,
) -> Result<ScorecardReport> {
    config.validate()?;
    let generated_on = Local::now().date_naive();
    let client = HttpClient::new(&config.network)?;

    let mut packages = fetch_catalog(&client, &config.sources).await?;

    progress.set_length(packages.len() as u64);
    fetch_all_checks(&client, &config.sources, &mut packages, progress).await;
    progress.finish_and_clear();

    let check_names = check_union(&packages);
    fill_in_missing_checks(&mut packages, &check_names);
    info!(
        "Scored {} packages over {} checks",
        packages.len(),
        check_names.len()
    );

    Ok(ScorecardReport {
        generated_on,
        check_names,
        packages: rank_packages(packages),
    })
}

/// Fetch scorecards for all packages with a bounded number in flight.
///
/// Each fetch returns its own result and only this loop writes to the set,
/// so no package is touched by two tasks. Returns once every fetch is done.
pub async fn fetch_all_checks(
    client: &HttpClient,
    sources: &SourceConfig,
    packages: &mut PackageSet,
    progress: &ProgressBar,
) {
    let workers = worker_count();
    debug!("Fetching {} scorecards with {} workers", packages.len(), workers);

    let mut results = stream::iter(packages.names())
        .map(|name| async move {
            let result = fetch_package_checks(client, sources, &name).await;
            (name, result)
        })
        .buffer_unordered(workers);

    while let Some((name, result)) = results.next().await {
        progress.inc(1);
        match result {
            Ok(Some(checks)) => {
                if let Some(package) = packages.get_mut(&name) {
                    package.merge_checks(&checks);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping scorecard for {}: {}", name, e),
        }
    }
}

/// Pool size heuristic: CPUs + 4 for I/O-bound work, capped at 32
fn worker_count() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    (cpus + 4).min(32)
}
