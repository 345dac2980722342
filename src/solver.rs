//! Client for the browser-automation solver service.
//!
//! Both sites are JavaScript-heavy and bot-protected, so raw HTML comes from
//! a FlareSolverr-style service: POST a render request, get back the rendered
//! page. A failed fetch means "no HTML for that source", never a scan abort.

use crate::config::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wreq::Client;

/// Fetch failure taxonomy. `Unreachable` marks a transport-level failure
/// (endpoint down or misconfigured), distinguishable from a solver that
/// answered but could not render the page.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("solver returned HTTP {0}")]
    HttpStatus(u16),

    #[error("solver reported status '{0}'")]
    SolverStatus(String),

    #[error("malformed solver response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("solver response missing rendered HTML")]
    MissingSolution,
}

impl SolverError {
    /// True when the failure points at a misconfigured or down endpoint
    /// rather than a page the solver could not handle.
    pub fn is_config_error(&self) -> bool {
        matches!(self, SolverError::Unreachable(_))
    }
}

/// Trait for fetching rendered HTML - enables mocking for tests.
#[async_trait]
pub trait PageSolver: Send + Sync {
    /// Returns the rendered HTML for the target URL.
    async fn fetch(&self, url: &str) -> Result<String, SolverError>;
}

#[derive(Serialize)]
struct SolverRequest<'a> {
    cmd: &'static str,
    url: &'a str,
    #[serde(rename = "maxTimeout")]
    max_timeout: u64,
}

#[derive(Deserialize)]
struct SolverResponse {
    status: String,
    solution: Option<Solution>,
}

#[derive(Deserialize)]
struct Solution {
    response: String,
}

/// HTTP client for the solver endpoint.
pub struct SolverClient {
    client: Client,
    endpoint: String,
    max_timeout_ms: u64,
}

impl SolverClient {
    /// Creates a client from the configuration.
    pub fn new(config: &Config) -> Result<Self, wreq::Error> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.solver_url.clone(),
            max_timeout_ms: config.solver_max_timeout_ms,
        })
    }
}

#[async_trait]
impl PageSolver for SolverClient {
    async fn fetch(&self, url: &str) -> Result<String, SolverError> {
        let request = SolverRequest { cmd: "request.get", url, max_timeout: self.max_timeout_ms };
        let body = serde_json::to_string(&request)?;

        info!("Fetching via solver: {}", url);
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| SolverError::Unreachable(err.to_string()))?;

        let status = response.status();
        debug!("Solver response status: {}", status);

        if !status.is_success() {
            return Err(SolverError::HttpStatus(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|err| SolverError::Unreachable(err.to_string()))?;
        let parsed: SolverResponse = serde_json::from_str(&text)?;

        if parsed.status != "ok" {
            return Err(SolverError::SolverStatus(parsed.status));
        }

        parsed.solution.map(|s| s.response).ok_or(SolverError::MissingSolution)
    }
}
