//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use seatrack_agent::http::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use seatrack_cache::DEFAULT_CACHE_PATH;
use seatrack_extractor::{ReturnSchema, DEFAULT_CARRIER, DEFAULT_SITE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Agent runner settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Record cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Agent runner and task settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Runner URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model the runner drives the browser with
    #[serde(default = "default_model")]
    pub model: String,

    /// Seconds to wait for one agent run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Run the browser without a window
    #[serde(default)]
    pub headless: bool,

    /// Answer shape requested from the agent
    #[serde(default)]
    pub schema: ReturnSchema,

    /// Tell the agent the site may have changed since the last lookup
    #[serde(default)]
    pub adaptive: bool,

    /// Tracking portal
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Carrier to select on the portal
    #[serde(default = "default_carrier")]
    pub carrier: String,
}

/// Record cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Persisted record file
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// Consult the cache before running the agent
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON record
    Json,
    /// Field/value table
    Table,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".seatrack").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.seatrack/config.toml`
    /// is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

impl AgentConfig {
    /// Agent run timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            headless: false,
            schema: ReturnSchema::default(),
            adaptive: false,
            site_url: default_site_url(),
            carrier: default_carrier(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            enabled: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Json,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_carrier() -> String {
    DEFAULT_CARRIER.to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}
