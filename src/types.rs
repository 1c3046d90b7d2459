//! Core data types for scorecard reporting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores keyed by check name. `None` means the check was not reported.
pub type CheckScores = BTreeMap<String, Option<f64>>;

/// One package from the download catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package name, unique within a run
    pub name: String,
    /// Downloads over the catalog's trailing period
    pub downloads: u64,
    /// Scorecard check results (0-10)
    pub checks: CheckScores,
    /// Mean of all checks with missing ones counted as zero
    pub overall: f64,
}

impl Package {
    /// Create a package with no check data yet
    pub fn new(name: impl Into<String>, downloads: u64) -> Self {
        Self {
            name: name.into(),
            downloads,
            checks: CheckScores::new(),
            overall: 0.0,
        }
    }

    /// Record a reported score, keeping the highest value seen for the check.
    ///
    /// Negative scores mean "not computed" upstream and are dropped.
    pub fn merge_check(&mut self, check: &str, score: f64) {
        crate::scoring::merge_check(&mut self.checks, check, score);
    }

    /// Merge every reported score from one fetch result
    pub fn merge_checks(&mut self, checks: &CheckScores) {
        for (name, score) in checks {
            if let Some(score) = score {
                self.merge_check(name, *score);
            }
        }
    }

    /// Whether any check was actually reported for this package
    pub fn has_scorecard(&self) -> bool {
        self.checks.values().any(Option::is_some)
    }
}

/// All packages of a run, keyed by name.
///
/// Every key exists before scorecards are fetched, so fetch results only
/// ever update an existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageSet {
    packages: BTreeMap<String, Package>,
}

impl PackageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, replacing any earlier one with the same name
    pub fn insert(&mut self, package: Package) {
        self.packages.insert(package.name.clone(), package);
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Package> {
        self.packages.get_mut(name)
    }

    /// Package names in a stable order
    pub fn names(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Package> {
        self.packages.values_mut()
    }

    pub fn into_packages(self) -> Vec<Package> {
        self.packages.into_values().collect()
    }
}

impl FromIterator<Package> for PackageSet {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut set = PackageSet::new();
        for package in iter {
            set.insert(package);
        }
        set
    }
}

/// Aggregated, ranked result of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardReport {
    /// Day the data was gathered; names the CSV snapshot
    pub generated_on: NaiveDate,
    /// Union of all check names, sorted; column order of both reports
    pub check_names: Vec<String>,
    /// Packages ranked by overall score, downloads, then name
    pub packages: Vec<Package>,
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_packages: usize,
    pub packages_with_scorecard: usize,
    pub check_count: usize,
    pub average_overall: f64,
}

impl ScorecardReport {
    /// Compute summary statistics from the ranked packages
    pub fn summary(&self) -> ReportSummary {
        let total = self.packages.len();
        let with_scorecard = self.packages.iter().filter(|p| p.has_scorecard()).count();
        let sum: f64 = self.packages.iter().map(|p| p.overall).sum();

        ReportSummary {
            total_packages: total,
            packages_with_scorecard: with_scorecard,
            check_count: self.check_names.len(),
            average_overall: if total > 0 { sum / total as f64 } else { 0.0 },
        }
    }
}
