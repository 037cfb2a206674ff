//! Seatrack Domain Layer
//!
//! This crate contains the core data model shared by every other Seatrack crate.
//! It defines the canonical tracking record, the raw shape an agent may hand
//! back, and the trait interfaces for the two external collaborators.
//!
//! ## Key Concepts
//!
//! - **TrackingRecord**: The four-field output; unresolved fields hold a sentinel, never null
//! - **RawAgentOutput**: Tagged union over what a browser agent returns (text or mapping)
//! - **Sentinel**: The literal `"Not available"`
//! - **Agent / RecordStore**: The agent invocation and the persistence slot
//!
//! ## Architecture
//!
//! - No I/O and no business logic beyond value helpers
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod raw;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use raw::RawAgentOutput;
pub use record::{is_unavailable, RecordField, TrackingRecord, NOT_AVAILABLE};
