//! Cache Gate: reuse a persisted record or signal a full retrieval

use seatrack_domain::traits::RecordStore;
use seatrack_domain::TrackingRecord;
use std::fmt::Display;
use tracing::{info, warn};

/// Outcome of consulting the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDecision {
    /// True when `record` can be returned without running the agent
    pub use_cache: bool,

    /// The persisted record, present only when `use_cache` is true
    pub record: Option<TrackingRecord>,
}

impl CacheDecision {
    fn hit(record: TrackingRecord) -> Self {
        Self {
            use_cache: true,
            record: Some(record),
        }
    }

    fn miss() -> Self {
        Self {
            use_cache: false,
            record: None,
        }
    }
}

/// Decides whether a persisted record is structurally usable
///
/// A record whose fields hold the sentinel is still a hit; only a missing,
/// unreadable or malformed file, or one saved for a different booking,
/// is a miss.
pub struct CacheGate<S> {
    store: S,
}

impl<S> CacheGate<S>
where
    S: RecordStore,
    S::Error: Display,
{
    /// Create a gate over a record store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: every read problem becomes a miss
    pub fn should_use_cache(&self, booking_id: &str) -> CacheDecision {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return CacheDecision::miss(),
            Err(e) => {
                warn!("Ignoring unreadable cache: {}", e);
                return CacheDecision::miss();
            }
        };

        if record.booking_id != booking_id {
            info!(
                cached = %record.booking_id,
                requested = booking_id,
                "Cached record belongs to another booking"
            );
            return CacheDecision::miss();
        }

        info!(booking_id, "Using cached tracking record");
        CacheDecision::hit(record)
    }
}
