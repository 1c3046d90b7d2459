use super::{check_value_or, create_truncated};
use crate::config::ScorecardConfig;
use crate::error::Result;
use crate::types::{Package, ScorecardReport};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Placeholder for checks that were not reported
const MISSING: &str = "–";

/// Render the leaderboard, capped at `output.max_readme_rows` ranked rows
pub fn render_markdown(report: &ScorecardReport, config: &ScorecardConfig) -> String {
    let mut md = String::new();

    md.push_str("# OpenSSF Scorecards for top Python packages\n\n");
    md.push_str(&format!(
        "Top {} Python packages by downloads and their \
         [OpenSSF Scorecard values](https://github.com/ossf/scorecard). \
         Data gathered from [deps.dev public dataset](https://deps.dev) on {} and is updated weekly. \
         Historical data can be found [under `data/`](data/). \
         For more information about individual Scorecard checks you can \
         [read the documentation](https://github.com/ossf/scorecard/blob/main/docs/checks.md).\n\n",
        group_thousands(report.packages.len() as u64),
        report.generated_on.format("%b %-d, %Y"),
    ));
    md.push_str(
        "**NOTE:** All missing values are scored as a zero. \
         deps.dev doesn't take missing values into account for their scoring of packages. \
         This is the likely reason why you may see a difference in the value reported here \
         versus the one on deps.dev for a package.\n\n",
    );

    md.push_str("Package|Downloads|Overall");
    for check_name in &report.check_names {
        md.push('|');
        md.push_str(check_name);
    }
    md.push('\n');
    md.push('-');
    md.push_str(&"|-".repeat(report.check_names.len() + 2));
    md.push('\n');

    for package in report.packages.iter().take(config.output.max_readme_rows) {
        md.push_str(&render_row(package, report, config));
        md.push('\n');
    }

    md
}

fn render_row(package: &Package, report: &ScorecardReport, config: &ScorecardConfig) -> String {
    let sources = &config.sources;
    let mut row = format!(
        "[{name}]({page})|{downloads}|[{overall:.2}/10]({scorecard})",
        name = package.name,
        page = sources.package_page(&package.name),
        downloads = group_thousands(package.downloads),
        overall = package.overall,
        scorecard = sources.scorecard_page(&package.name),
    );
    for check_name in &report.check_names {
        row.push('|');
        row.push_str(&check_value_or(
            package.checks.get(check_name).copied().flatten(),
            MISSING,
        ));
    }
    row
}

/// Write the Markdown report, replacing the previous one
pub fn write_markdown(report: &ScorecardReport, config: &ScorecardConfig) -> Result<PathBuf> {
    let path = config.output.readme_path();

    let mut file = create_truncated(&path)?;
    file.write_all(render_markdown(report, config).as_bytes())?;
    file.flush()?;

    info!("Wrote leaderboard to {}", path.display());
    Ok(path)
}

/// Format an integer with `,` between groups of three digits
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
