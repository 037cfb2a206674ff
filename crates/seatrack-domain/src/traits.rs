//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{RawAgentOutput, TrackingRecord};

/// Trait for persisting the last extracted record
///
/// Implemented by the infrastructure layer (seatrack-cache)
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Load the persisted record, `Ok(None)` when nothing has been stored
    fn load(&self) -> Result<Option<TrackingRecord>, Self::Error>;

    /// Persist a record, fully replacing any previous one
    fn save(&self, record: &TrackingRecord) -> Result<(), Self::Error>;
}

/// Trait for the browser agent that performs the live lookup
///
/// Implemented by the infrastructure layer (seatrack-agent). Calls block;
/// async callers run them on a blocking task.
pub trait Agent {
    /// Error type for agent operations
    type Error;

    /// Carry out a natural-language task and return the raw result
    fn run(&self, task: &str) -> Result<RawAgentOutput, Self::Error>;

    /// Release any resource held by the agent (e.g. a browser session)
    ///
    /// Must be safe to call after a failed or abandoned `run`.
    fn close(&self) -> Result<(), Self::Error>;
}
