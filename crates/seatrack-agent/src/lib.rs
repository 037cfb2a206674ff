//! Seatrack Agent Layer
//!
//! Implementations of the `Agent` trait from `seatrack-domain`.
//!
//! # Agents
//!
//! - `MockAgent`: Deterministic mock for testing
//! - `HttpAgent`: Client for an HTTP browser-agent runner
//!
//! # Examples
//!
//! ```
//! use seatrack_agent::MockAgent;
//! use seatrack_domain::traits::Agent;
//!
//! let agent = MockAgent::new("Vessel Name: YM MANDATE");
//! let output = agent.run("track SINI25432400").unwrap();
//! assert_eq!(output.as_text(), "Vessel Name: YM MANDATE");
//! agent.close().unwrap();
//! assert_eq!(agent.close_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod http;

use seatrack_domain::traits::Agent as AgentTrait;
use seatrack_domain::RawAgentOutput;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use http::HttpAgent;

/// Errors that can occur while driving the agent
#[derive(Error, Debug)]
pub enum AgentError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Runner answered with something unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model quota or rate limit exhausted
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Agent was already closed
    #[error("Agent session is closed")]
    Closed,

    /// Generic error
    #[error("Agent error: {0}")]
    Other(String),
}

impl AgentError {
    /// Classify the failure for user-facing guidance
    pub fn kind(&self) -> FailureKind {
        match self {
            AgentError::QuotaExhausted(_) => FailureKind::QuotaExhausted,
            AgentError::Closed => FailureKind::Unclassified,
            other => classify_message(&other.to_string()),
        }
    }
}

/// Broad cause of an agent failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// API quota or rate limit
    QuotaExhausted,
    /// Network, DNS or timeout trouble
    Connectivity,
    /// Anything else
    Unclassified,
}

const QUOTA_MARKERS: &[&str] = &[
    "quota",
    "rate limit",
    "rate-limit",
    "ratelimit",
    "429",
    "resource_exhausted",
    "resource exhausted",
    "too many requests",
];

const CONNECTIVITY_MARKERS: &[&str] = &[
    "connect",
    "timeout",
    "timed out",
    "dns",
    "network",
    "refused",
    "unreachable",
];

/// Classify a failure by its message text
///
/// Quota markers are checked first, since rate-limit responses often
/// mention the connection too.
///
/// # Examples
///
/// ```
/// use seatrack_agent::{classify_message, FailureKind};
///
/// assert_eq!(classify_message("429 Too Many Requests"), FailureKind::QuotaExhausted);
/// assert_eq!(classify_message("connection refused"), FailureKind::Connectivity);
/// assert_eq!(classify_message("element not found"), FailureKind::Unclassified);
/// ```
pub fn classify_message(message: &str) -> FailureKind {
    let message = message.to_lowercase();
    if QUOTA_MARKERS.iter().any(|marker| message.contains(marker)) {
        FailureKind::QuotaExhausted
    } else if CONNECTIVITY_MARKERS.iter().any(|marker| message.contains(marker)) {
        FailureKind::Connectivity
    } else {
        FailureKind::Unclassified
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Output(RawAgentOutput),
    Failure(String),
}

/// Mock agent for deterministic testing
///
/// Returns pre-configured output without any network calls. Clones share
/// their call counts.
///
/// # Examples
///
/// ```
/// use seatrack_agent::MockAgent;
/// use seatrack_domain::traits::Agent;
///
/// let mut agent = MockAgent::default();
/// agent.add_response("task one", "answer one");
/// agent.add_error("task two", "quota exceeded");
/// assert_eq!(agent.run("task one").unwrap().as_text(), "answer one");
/// assert!(agent.run("task two").is_err());
/// assert_eq!(agent.run_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockAgent {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    delay: Option<Duration>,
    close_fails: bool,
    run_count: Arc<Mutex<usize>>,
    close_count: Arc<Mutex<usize>>,
}

impl MockAgent {
    /// Create a mock returning the same output for every task
    pub fn new(output: impl Into<RawAgentOutput>) -> Self {
        Self {
            default_reply: MockReply::Output(output.into()),
            replies: Arc::new(Mutex::new(HashMap::new())),
            delay: None,
            close_fails: false,
            run_count: Arc::new(Mutex::new(0)),
            close_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose every run fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        let mut agent = Self::default();
        agent.default_reply = MockReply::Failure(message.into());
        agent
    }

    /// Add a specific output for a given task
    pub fn add_response(&mut self, task: impl Into<String>, output: impl Into<RawAgentOutput>) {
        self.replies
            .lock()
            .unwrap()
            .insert(task.into(), MockReply::Output(output.into()));
    }

    /// Configure to fail for a specific task
    pub fn add_error(&mut self, task: impl Into<String>, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .insert(task.into(), MockReply::Failure(message.into()));
    }

    /// Block for `delay` inside every run
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make `close` report an error (it is still counted)
    pub fn with_close_failure(mut self) -> Self {
        self.close_fails = true;
        self
    }

    /// Number of times `run` was called
    pub fn run_count(&self) -> usize {
        *self.run_count.lock().unwrap()
    }

    /// Number of times `close` was called
    pub fn close_count(&self) -> usize {
        *self.close_count.lock().unwrap()
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new(RawAgentOutput::text(""))
    }
}

impl AgentTrait for MockAgent {
    type Error = AgentError;

    fn run(&self, task: &str) -> Result<RawAgentOutput, Self::Error> {
        *self.run_count.lock().unwrap() += 1;

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(task)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Output(output) => Ok(output),
            MockReply::Failure(message) => Err(AgentError::Other(message)),
        }
    }

    fn close(&self) -> Result<(), Self::Error> {
        *self.close_count.lock().unwrap() += 1;
        if self.close_fails {
            return Err(AgentError::Other("Mock close failure".to_string()));
        }
        Ok(())
    }
}
