//! Fetch the most downloaded packages from the top-pypi-packages dataset

use crate::config::SourceConfig;
use crate::error::{Result, ScorecardError};
use crate::http::HttpClient;
use crate::types::{Package, PackageSet};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    rows: Vec<CatalogRow>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    project: String,
    download_count: u64,
}

/// Fetch the catalog and build one empty package per row.
///
/// Any failure here is fatal: without the catalog there is nothing to score.
pub async fn fetch_catalog(client: &HttpClient, sources: &SourceConfig) -> Result<PackageSet> {
    debug!("Fetching package catalog from {}", sources.catalog_url);

    let response = client.get(&sources.catalog_url).await?;
    if response.status() != StatusCode::OK {
        return Err(ScorecardError::api(
            "top-pypi-packages",
            format!("HTTP {}: {}", response.status(), sources.catalog_url),
        ));
    }

    let body = response.text().await?;
    let packages = parse_catalog(&body)?;

    info!("Loaded {} packages from catalog", packages.len());
    Ok(packages)
}

fn parse_catalog(body: &str) -> Result<PackageSet> {
    let catalog: CatalogResponse = serde_json::from_str(body)?;
    Ok(catalog
        .rows
        .into_iter()
        .map(|row| Package::new(row.project, row.download_count))
        .collect())
}
