//! Check aggregation and overall scoring

use crate::types::{CheckScores, Package, PackageSet};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Merge one reported score into a check map, keeping the maximum.
///
/// Negative scores are the upstream marker for "not computed" and never
/// stored. A reported score always replaces an absent entry.
pub fn merge_check(checks: &mut CheckScores, check: &str, score: f64) {
    if score.is_nan() || score < 0.0 {
        return;
    }
    match checks.get_mut(check) {
        Some(Some(existing)) if *existing >= score => {}
        Some(slot) => *slot = Some(score),
        None => {
            checks.insert(check.to_string(), Some(score));
        }
    }
}

/// Sorted union of every check name seen across all packages
pub fn check_union(packages: &PackageSet) -> Vec<String> {
    packages
        .iter()
        .flat_map(|package| package.checks.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Mean over all checks with absent values counted as zero
pub fn overall_score(checks: &CheckScores) -> f64 {
    if checks.is_empty() {
        return 0.0;
    }
    let sum: f64 = checks.values().map(|v| v.unwrap_or(0.0)).sum();
    sum / checks.len() as f64
}

/// Back-fill every missing check as absent and compute each overall score.
///
/// Must run after all fetches so that every package is scored against the
/// same set of checks.
pub fn fill_in_missing_checks(packages: &mut PackageSet, check_names: &[String]) {
    for package in packages.iter_mut() {
        for check_name in check_names {
            package.checks.entry(check_name.clone()).or_insert(None);
        }
        package.overall = overall_score(&package.checks);
    }
}

/// Ranking order: highest overall, then most downloads, then name
pub fn compare_packages(a: &Package, b: &Package) -> Ordering {
    b.overall
        .total_cmp(&a.overall)
        .then_with(|| b.downloads.cmp(&a.downloads))
        .then_with(|| a.name.cmp(&b.name))
}

/// Consume the set and return packages in ranking order
pub fn rank_packages(packages: PackageSet) -> Vec<Package> {
    let mut ranked = packages.into_packages();
    ranked.sort_by(compare_packages);
    ranked
}
