use super::{check_value_or, create_truncated};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::types::ScorecardReport;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Render the full ranked package set as CSV
pub fn render_csv(report: &ScorecardReport) -> String {
    let mut csv = String::new();

    csv.push_str("Package,Downloads,Overall");
    for check_name in &report.check_names {
        csv.push(',');
        csv.push_str(check_name);
    }
    csv.push('\n');

    for package in &report.packages {
        let values: Vec<String> = report
            .check_names
            .iter()
            .map(|name| check_value_or(package.checks.get(name).copied().flatten(), ""))
            .collect();
        csv.push_str(&format!(
            "{},{},{:.2}",
            package.name, package.downloads, package.overall
        ));
        for value in values {
            csv.push(',');
            csv.push_str(&value);
        }
        csv.push('\n');
    }

    csv
}

/// Write `<data dir>/<YYYY-MM-DD>.csv`, replacing any snapshot from the same day
pub fn write_csv(report: &ScorecardReport, output: &OutputConfig) -> Result<PathBuf> {
    let path = output
        .data_path()
        .join(format!("{}.csv", report.generated_on.format("%Y-%m-%d")));

    let mut file = create_truncated(&path)?;
    file.write_all(render_csv(report).as_bytes())?;
    file.flush()?;

    info!("Wrote {} rows to {}", report.packages.len(), path.display());
    Ok(path)
}
