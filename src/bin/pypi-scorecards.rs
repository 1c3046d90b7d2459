//! CLI tool that regenerates the PyPI scorecard reports

use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pypi_scorecards::{run, RunSummary, ScorecardConfig};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pypi-scorecards")]
#[command(about = "Collect OpenSSF Scorecards for the top PyPI packages and write the CSV and Markdown reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a configuration file (TOML) overriding the built-in sources and paths
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} packages ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    match run(&config, &progress).await {
        Ok(summary) => display_summary(&summary),
        Err(e) => {
            progress.abandon();
            eprintln!("{} Scorecard run failed: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScorecardConfig> {
    match path {
        Some(path) => ScorecardConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ScorecardConfig::default()),
    }
}

fn display_summary(run: &RunSummary) {
    let summary = &run.summary;
    println!("\n{}", "=== Scorecard Summary ===".bold());
    println!("Packages ranked: {}", summary.total_packages);
    println!(
        "  {} {}",
        "●".green(),
        format!("With scorecard data: {}", summary.packages_with_scorecard).green()
    );
    println!(
        "  {} {}",
        "●".yellow(),
        format!(
            "Without scorecard data: {}",
            summary.total_packages - summary.packages_with_scorecard
        )
        .yellow()
    );
    println!("Checks: {}", summary.check_count);
    println!("Average overall score: {:.2}", summary.average_overall);
    println!();
    println!("CSV snapshot: {}", run.csv_path.display().to_string().cyan());
    println!("Leaderboard: {}", run.readme_path.display().to_string().cyan());
}
