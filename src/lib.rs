//! # pypi_scorecards
//!
//! Builds an OpenSSF Scorecard leaderboard for the most downloaded Python
//! packages:
//! - **Catalog**: the top packages by downloads over the last 30 days
//! - **Scorecards**: per-check scores from the deps.dev aggregation API,
//!   max-merged across every project linked to a package
//! - **Scoring**: an overall score per package, with unreported checks
//!   counted as zero
//! - **Reports**: a dated CSV snapshot and a Markdown leaderboard
//!
//! ## Quick Start
//!
//! ```no_run
//! use indicatif::ProgressBar;
//! use pypi_scorecards::{collect_scorecards, ScorecardConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = ScorecardConfig::default();
//! let report = collect_scorecards(&config, &ProgressBar::hidden()).await?;
//!
//! for package in report.packages.iter().take(10) {
//!     println!("{}: {:.2}", package.name, package.overall);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod http;
mod metadata;
mod pipeline;
mod report;
mod scoring;
mod types;

// Re-export public API
pub use config::{NetworkConfig, OutputConfig, ScorecardConfig, ScorecardConfigBuilder, SourceConfig};
pub use error::{Result, ScorecardError};
pub use http::{HttpClient, RetryPolicy};
pub use metadata::{fetch_catalog, fetch_package_checks};
pub use pipeline::{collect_scorecards, fetch_all_checks, run, RunSummary};
pub use report::{render_csv, render_markdown, write_csv, write_markdown};
pub use scoring::{check_union, compare_packages, fill_in_missing_checks, merge_check, overall_score, rank_packages};
pub use types::{CheckScores, Package, PackageSet, ReportSummary, ScorecardReport};
