//! Error types for the CLI application.

use seatrack_agent::{AgentError, FailureKind};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error (missing credential, unreadable config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Agent failure after cleanup
    #[error("{0}")]
    Agent(#[from] AgentError),

    /// Agent did not finish in time
    #[error("Agent did not finish within {0}s")]
    Timeout(u64),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Suggested next step for the user, if there is one
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            CliError::Agent(e) => match e.kind() {
                FailureKind::QuotaExhausted => Some(
                    "The model API quota is exhausted. Wait for it to reset or use a different API key.",
                ),
                FailureKind::Connectivity => Some(
                    "Check your network connection and that the agent runner endpoint is reachable.",
                ),
                FailureKind::Unclassified => None,
            },
            CliError::Timeout(_) => {
                Some("Increase agent.timeout_secs in the config file or retry later.")
            }
            CliError::Toml(_) => Some("Fix the config file or pass --config with a valid one."),
            _ => None,
        }
    }
}
