//! Track command implementation.
//!
//! One path for every run: cache gate, agent under a timeout, extraction,
//! persistence. The agent is closed exactly once whenever it was started.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use seatrack_agent::{AgentError, HttpAgent};
use seatrack_cache::{CacheGate, JsonFileStore};
use seatrack_domain::traits::{Agent, RecordStore};
use seatrack_domain::{RawAgentOutput, TrackingRecord};
use seatrack_extractor::{extract_traced, Strategy, TaskBuilder};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Inputs for one lookup
#[derive(Debug, Clone)]
pub struct TrackRequest {
    /// Booking to look up
    pub booking_id: String,

    /// Consult the Cache Gate first
    pub use_cache: bool,

    /// Upper bound on the agent run
    pub timeout: Duration,

    /// Instruction handed to the agent
    pub task: String,
}

impl TrackRequest {
    /// Build a request from the configuration
    pub fn new(booking_id: impl Into<String>, config: &Config, use_cache: bool) -> Self {
        let booking_id = booking_id.into();
        let task = TaskBuilder::new(booking_id.clone())
            .site_url(config.agent.site_url.clone())
            .carrier(config.agent.carrier.clone())
            .schema(config.agent.schema)
            .with_prior_run(config.agent.adaptive)
            .build();

        Self {
            booking_id,
            use_cache,
            timeout: config.agent.timeout(),
            task,
        }
    }
}

/// Where the returned record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    /// Reused from the persisted record
    Cache,
    /// Extracted from a fresh agent run
    Agent,
}

/// Result of a lookup
#[derive(Debug, Clone)]
pub struct TrackOutcome {
    /// The record to report
    pub record: TrackingRecord,

    /// Cache hit or fresh run
    pub source: RecordSource,

    /// Extraction strategy, for fresh runs
    pub strategy: Option<Strategy>,
}

/// Look up a booking, reusing the cached record when allowed
///
/// # Errors
///
/// - `CliError::Agent` if the agent run fails
/// - `CliError::Timeout` if it does not finish within `request.timeout`
///
/// The agent is closed before either error is returned. A failure to
/// persist the record is logged and does not fail the lookup.
pub async fn track_booking<A, S>(
    agent: A,
    gate: &CacheGate<S>,
    request: &TrackRequest,
) -> Result<TrackOutcome>
where
    A: Agent<Error = AgentError> + Send + Sync + 'static,
    S: RecordStore,
    S::Error: Display,
{
    if request.use_cache {
        let decision = gate.should_use_cache(&request.booking_id);
        if let (true, Some(record)) = (decision.use_cache, decision.record) {
            return Ok(TrackOutcome {
                record,
                source: RecordSource::Cache,
                strategy: None,
            });
        }
    }

    info!(booking_id = %request.booking_id, "Running browser agent");
    let agent = Arc::new(agent);
    let result = run_agent(Arc::clone(&agent), request).await;
    release(agent).await;
    let raw = result?;

    let extraction = extract_traced(&raw, &request.booking_id);
    if let Err(e) = gate.store().save(&extraction.record) {
        warn!("Failed to persist tracking record: {}", e);
    }

    Ok(TrackOutcome {
        record: extraction.record,
        source: RecordSource::Agent,
        strategy: Some(extraction.strategy),
    })
}

/// Run the agent on a blocking task under the request timeout
async fn run_agent<A>(agent: Arc<A>, request: &TrackRequest) -> Result<RawAgentOutput>
where
    A: Agent<Error = AgentError> + Send + Sync + 'static,
{
    let task = request.task.clone();
    let handle = tokio::task::spawn_blocking(move || agent.run(&task));

    match timeout(request.timeout, handle).await {
        Ok(Ok(output)) => Ok(output?),
        Ok(Err(e)) => Err(CliError::Agent(AgentError::Other(format!(
            "Agent task join error: {}",
            e
        )))),
        Err(_) => {
            warn!("Agent run exceeded {}s", request.timeout.as_secs());
            Err(CliError::Timeout(request.timeout.as_secs()))
        }
    }
}

/// Close the agent; failures are logged only
async fn release<A>(agent: Arc<A>)
where
    A: Agent<Error = AgentError> + Send + Sync + 'static,
{
    match tokio::task::spawn_blocking(move || agent.close()).await {
        Ok(Ok(())) => debug!("Agent released"),
        Ok(Err(e)) => warn!("Failed to close agent: {}", e),
        Err(e) => warn!("Agent close task failed: {}", e),
    }
}

/// Execute the track command.
pub async fn execute_track(cli: Cli, config: &Config, formatter: &Formatter) -> Result<()> {
    let api_key = cli
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config(
                "No API key configured. Set GOOGLE_API_KEY or pass --api-key.".to_string(),
            )
        })?;

    let agent = HttpAgent::new(&config.agent.endpoint, api_key)?
        .with_model(&config.agent.model)
        .with_headless(cli.headless || config.agent.headless)
        .with_request_timeout(config.agent.timeout());

    let gate = CacheGate::new(JsonFileStore::new(&config.cache.path));
    let use_cache = config.cache.enabled && !cli.no_cache;
    let request = TrackRequest::new(cli.booking_id, config, use_cache);

    eprintln!(
        "{}",
        formatter.info(&format!("Tracking booking {}", request.booking_id))
    );

    let outcome = track_booking(agent, &gate, &request).await?;
    match outcome.source {
        RecordSource::Cache => eprintln!(
            "{}",
            formatter.info(&format!(
                "Using cached result from {}",
                gate.store().path().display()
            ))
        ),
        RecordSource::Agent => {
            let strategy = outcome.strategy.unwrap_or(Strategy::Default);
            eprintln!(
                "{}",
                formatter.success(&format!("Retrieved result ({})", strategy))
            );
        }
    }

    if let Some(notice) = formatter.record_notice(&outcome.record) {
        eprintln!("{}", notice);
    }

    println!("{}", formatter.format_record(&outcome.record)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatrack_extractor::ReturnSchema;

    #[test]
    fn test_request_from_config() {
        let mut config = Config::default();
        config.agent.timeout_secs = 42;
        config.agent.schema = ReturnSchema::Flat;

        let request = TrackRequest::new("SINI25432400", &config, true);
        assert_eq!(request.timeout, Duration::from_secs(42));
        assert!(request.task.contains("SINI25432400"));
        assert!(request.task.contains("\"booking_id\""));
        assert!(request.use_cache);
    }

    #[test]
    fn test_adaptive_task() {
        let mut config = Config::default();
        config.agent.adaptive = true;
        let request = TrackRequest::new("B1", &config, false);
        assert!(request.task.contains("adapt your approach"));
    }
}
