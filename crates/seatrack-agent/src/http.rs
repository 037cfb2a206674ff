//! HTTP Agent Implementation
//!
//! Drives a browser-agent runner service over HTTP. The runner owns the
//! browser and the language model; this client only submits the task and
//! releases the session afterwards.
//!
//! # Examples
//!
//! ```no_run
//! use seatrack_agent::HttpAgent;
//! use seatrack_domain::traits::Agent;
//!
//! let agent = HttpAgent::new("http://localhost:8787", "api-key")
//!     .unwrap()
//!     .with_model("gemini-2.0-flash")
//!     .with_headless(true);
//! let output = agent.run("Track booking SINI25432400");
//! agent.close().unwrap();
//! ```

use crate::AgentError;
use seatrack_domain::traits::Agent as AgentTrait;
use seatrack_domain::RawAgentOutput;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default runner endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8787";

/// Default model the runner drives the browser with
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default per-request timeout (10 minutes)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Client for an HTTP browser-agent runner
pub struct HttpAgent {
    endpoint: String,
    model: String,
    api_key: String,
    headless: bool,
    request_timeout: Duration,
    client: reqwest::blocking::Client,
    closed: AtomicBool,
}

/// Request body for the runner's run API
#[derive(Serialize)]
struct RunRequest<'a> {
    task: &'a str,
    model: &'a str,
    headless: bool,
}

impl HttpAgent {
    /// Create a client for the runner at `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Other` if the HTTP client cannot be built
    /// (e.g. TLS backend initialization fails).
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AgentError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| AgentError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            headless: false,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            client,
            closed: AtomicBool::new(false),
        })
    }

    /// Set the model the runner should use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Run the browser without a visible window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Runner endpoint without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Map a non-success HTTP status to an error
    fn status_error(status: reqwest::StatusCode, body: String) -> AgentError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            AgentError::QuotaExhausted(format!("HTTP {}: {}", status, body))
        } else {
            AgentError::Communication(format!("HTTP {}: {}", status, body))
        }
    }
}

impl AgentTrait for HttpAgent {
    type Error = AgentError;

    fn run(&self, task: &str) -> Result<RawAgentOutput, Self::Error> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AgentError::Closed);
        }

        let body = RunRequest {
            task,
            model: &self.model,
            headless: self.headless,
        };

        info!(model = %self.model, headless = self.headless, "Submitting task to agent runner");
        let response = self
            .client
            .post(self.url("/api/run"))
            .bearer_auth(&self.api_key)
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .map_err(|e| AgentError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| AgentError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::status_error(status, text));
        }

        debug!("Agent runner returned {} bytes", text.len());
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => Ok(RawAgentOutput::from(value)),
            Err(_) => Ok(RawAgentOutput::Text(text)),
        }
    }

    fn close(&self) -> Result<(), Self::Error> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let response = self
            .client
            .post(self.url("/api/close"))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(30))
            .send()
            .map_err(|e| AgentError::Communication(format!("Close request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!("Agent runner refused close: HTTP {}", status);
            return Err(Self::status_error(status, body));
        }

        debug!("Agent session closed");
        Ok(())
    }
}
