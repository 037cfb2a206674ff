//! Seatrack Extractor
//!
//! Turns whatever a browser agent returns into a four-field [`TrackingRecord`].
//!
//! # Overview
//!
//! Agents answer in free text, markdown tables, fenced JSON or partially
//! filled dictionaries, sometimes wrapped in metadata envelopes. The extractor
//! runs a fixed cascade of strategies, from the most reliable to the most
//! permissive, and stops at the first one that resolves any field:
//!
//! ```text
//! mapping unwrap → direct fields → embedded JSON → table row → natural language → sentinels
//! ```
//!
//! Extraction is total: it never fails and never panics. Unresolved fields
//! hold [`NOT_AVAILABLE`](seatrack_domain::NOT_AVAILABLE).
//!
//! # Example Usage
//!
//! ```
//! use seatrack_domain::RawAgentOutput;
//! use seatrack_extractor::extract;
//!
//! let raw = RawAgentOutput::text(
//!     "Vessel Name: YM MANDATE. Voyage Number: 0096W. Arrival Date and Time (ETB): 2025-03-28 10:38",
//! );
//! let record = extract(&raw, "SINI25432400");
//!
//! assert_eq!(record.vessel_name, "YM MANDATE");
//! assert_eq!(record.voyage_number, "0096W");
//! assert_eq!(record.arrival_date, "2025-03-28 10:38");
//! ```
//!
//! The [`TaskBuilder`] renders the instruction that asks the agent for one of
//! the shapes the cascade understands best.

#![warn(missing_docs)]

mod extractor;
mod mapping;
mod normalize;
mod parser;
mod splitter;
mod task;
mod text;
mod types;

#[cfg(test)]
mod tests;

pub use extractor::{extract, extract_traced, extract_value};
pub use normalize::normalize_arrival_date;
pub use splitter::{is_voyage_token, split_combined};
pub use task::{ReturnSchema, TaskBuilder, DEFAULT_CARRIER, DEFAULT_SITE_URL};
pub use types::{Extraction, Strategy};

// Re-exported so callers need only this crate for the common path
pub use seatrack_domain::{RawAgentOutput, TrackingRecord};
