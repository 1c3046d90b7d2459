//! Configuration for data sources, output locations and network behavior

use crate::error::{Result, ScorecardError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const TOP_PYPI_PACKAGES_URL: &str =
    "https://raw.githubusercontent.com/hugovk/top-pypi-packages/main/top-pypi-packages-30-days.min.json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Main configuration for a scorecard run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Where the catalog and scorecards come from
    pub sources: SourceConfig,
    /// Where the reports are written
    pub output: OutputConfig,
    /// Network configuration
    pub network: NetworkConfig,
}

/// Upstream data sources and the link targets used in the Markdown report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON document listing the most downloaded packages
    pub catalog_url: String,
    /// Base URL of the deps.dev API
    pub deps_dev_base: String,
    /// deps.dev ecosystem (system) name
    pub ecosystem: String,
    /// Base URL of per-package pages on the package index
    pub package_page_base: String,
    /// Base URL of per-package scorecard pages
    pub scorecard_page_base: String,
}

/// Report output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that holds the Markdown report and the data directory
    pub base_dir: PathBuf,
    /// Subdirectory (relative to `base_dir`) for dated CSV snapshots
    pub data_dir: PathBuf,
    /// Markdown report file name (relative to `base_dir`)
    pub readme: PathBuf,
    /// Maximum number of ranked rows in the Markdown table
    pub max_readme_rows: usize,
}

/// Network configuration for API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Base backoff between retries (milliseconds), doubled per retry
    pub backoff_factor_ms: u64,
    /// Upper bound for a single backoff sleep (seconds)
    pub max_backoff_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            catalog_url: TOP_PYPI_PACKAGES_URL.to_string(),
            deps_dev_base: "https://deps.dev".to_string(),
            ecosystem: "pypi".to_string(),
            package_page_base: "https://pypi.org/project".to_string(),
            scorecard_page_base: "https://deps.dev".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            readme: PathBuf::from("README.md"),
            max_readme_rows: 1000,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 10,
            backoff_factor_ms: 500,
            max_backoff_secs: 120,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl SourceConfig {
    /// deps.dev endpoint for one package's scorecard data
    pub fn scorecard_url(&self, package: &str) -> String {
        format!(
            "{}/_/s/{}/p/{}/v/",
            self.deps_dev_base.trim_end_matches('/'),
            self.ecosystem,
            urlencoding::encode(package)
        )
    }

    /// Link to the package on the package index
    pub fn package_page(&self, package: &str) -> String {
        format!("{}/{}", self.package_page_base.trim_end_matches('/'), package)
    }

    /// Link to the package's scorecard page
    pub fn scorecard_page(&self, package: &str) -> String {
        format!(
            "{}/{}/{}",
            self.scorecard_page_base.trim_end_matches('/'),
            self.ecosystem,
            package
        )
    }
}

impl OutputConfig {
    /// Directory holding the dated CSV files
    pub fn data_path(&self) -> PathBuf {
        self.base_dir.join(&self.data_dir)
    }

    /// Full path of the Markdown report
    pub fn readme_path(&self) -> PathBuf {
        self.base_dir.join(&self.readme)
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get backoff factor as Duration
    pub fn backoff_factor(&self) -> Duration {
        Duration::from_millis(self.backoff_factor_ms)
    }

    /// Get backoff ceiling as Duration
    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

impl ScorecardConfig {
    /// Create a new builder for ScorecardConfig
    pub fn builder() -> ScorecardConfigBuilder {
        ScorecardConfigBuilder::default()
    }

    /// Load a (possibly partial) configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [
            ("sources.catalog_url", &self.sources.catalog_url),
            ("sources.deps_dev_base", &self.sources.deps_dev_base),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ScorecardError::config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    field, url
                )));
            }
        }
        if self.sources.ecosystem.trim().is_empty() {
            return Err(ScorecardError::config("sources.ecosystem must not be empty"));
        }
        if self.output.max_readme_rows == 0 {
            return Err(ScorecardError::config("output.max_readme_rows must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for ScorecardConfig
#[derive(Default)]
pub struct ScorecardConfigBuilder {
    sources: Option<SourceConfig>,
    output: Option<OutputConfig>,
    network: Option<NetworkConfig>,
}

impl ScorecardConfigBuilder {
    pub fn sources(mut self, sources: SourceConfig) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn output(mut self, output: OutputConfig) -> Self {
        self.output = Some(output);
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> ScorecardConfig {
        ScorecardConfig {
            sources: self.sources.unwrap_or_default(),
            output: self.output.unwrap_or_default(),
            network: self.network.unwrap_or_default(),
        }
    }
}
