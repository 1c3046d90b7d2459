//! CSV snapshot and Markdown leaderboard writers

mod csv;
mod markdown;

pub use self::csv::{render_csv, write_csv};
pub use self::markdown::{render_markdown, write_markdown};

/// Render a check value, or `empty` when the check was not reported
fn check_value_or(value: Option<f64>, empty: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => empty.to_string(),
    }
}

/// Open `path` for writing, truncating existing content
fn create_truncated(path: &std::path::Path) -> std::io::Result<std::io::BufWriter<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{Package, ScorecardReport};
    use chrono::NaiveDate;

    /// Two ranked packages over the checks `Fuzzing` and `License`
    pub fn sample_report() -> ScorecardReport {
        let mut boto3 = Package::new("boto3", 1_234_567);
        boto3.checks.insert("Fuzzing".to_string(), None);
        boto3.checks.insert("License".to_string(), Some(10.0));
        boto3.overall = 5.0;

        let mut six = Package::new("six", 42);
        six.checks.insert("Fuzzing".to_string(), None);
        six.checks.insert("License".to_string(), None);

        ScorecardReport {
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            check_names: vec!["Fuzzing".to_string(), "License".to_string()],
            packages: vec![boto3, six],
        }
    }
}
