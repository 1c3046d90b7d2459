//! HTTP client with bounded retry and exponential backoff

use crate::config::NetworkConfig;
use crate::error::{Result, ScorecardError};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Statuses worth another attempt
const RETRY_STATUSES: [u16; 6] = [413, 429, 500, 502, 503, 504];

/// Statuses for which a `Retry-After` header is honored
const RETRY_AFTER_STATUSES: [u16; 3] = [413, 429, 503];

/// Fixed retry budget and backoff curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_factor: config.backoff_factor(),
            max_backoff: config.max_backoff(),
        }
    }

    /// Sleep before the given retry (1-based): `factor * 2^(retry - 1)`, capped
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.backoff_factor
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// GET-only client shared by every fetch task
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Build HTTP client with proper configuration
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ScorecardError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            policy: RetryPolicy::from_config(config),
        })
    }

    /// Issue a GET, retrying transport failures and transient statuses.
    ///
    /// Once the budget is spent on a retryable status the last response is
    /// handed back so the caller decides what that status means.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let mut retries = 0;

        loop {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !is_retryable(status) || retries >= self.policy.max_retries {
                        return Ok(response);
                    }
                    retries += 1;
                    let delay = retry_after(&response).unwrap_or_else(|| self.policy.backoff(retries));
                    debug!("{} returned {}, retry {} after {:?}", url, status, retries, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    if retries >= self.policy.max_retries {
                        warn!("Request to {} failed: {}", url, e);
                        return Err(ScorecardError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: retries + 1,
                        });
                    }
                    retries += 1;
                    let delay = self.policy.backoff(retries);
                    debug!("Request to {} failed ({}), retry {} after {:?}", url, e, retries, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    RETRY_STATUSES.contains(&status.as_u16())
}

fn retry_after(response: &Response) -> Option<Duration> {
    if !RETRY_AFTER_STATUSES.contains(&response.status().as_u16()) {
        return None;
    }
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
