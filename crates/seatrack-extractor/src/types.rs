//! Extraction result types

use seatrack_domain::{is_unavailable, TrackingRecord};
use std::fmt;

/// Strategy that produced an extraction, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Canonical fields or a voyage list on a mapping
    DirectFields,
    /// JSON object found inside text (fenced or bare)
    EmbeddedJson,
    /// Pipe-delimited table row ending in a timestamp
    TableRow,
    /// Independent phrase matches ("Vessel Name: ...")
    NaturalLanguage,
    /// Nothing matched; every derived field is the sentinel
    Default,
}

impl Strategy {
    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::DirectFields => "direct_fields",
            Strategy::EmbeddedJson => "embedded_json",
            Strategy::TableRow => "table_row",
            Strategy::NaturalLanguage => "natural_language",
            Strategy::Default => "default",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record together with how it was found
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The normalized record
    pub record: TrackingRecord,

    /// Strategy that resolved at least one field
    pub strategy: Strategy,

    /// Wrapper keys unwrapped on the way, outermost first
    pub wrapper_path: Vec<&'static str>,
}

/// Derived fields found by a single strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Fields {
    pub vessel_name: Option<String>,
    pub voyage_number: Option<String>,
    pub arrival_date: Option<String>,
}

impl Fields {
    /// Build from candidates, dropping empty and sentinel values
    pub fn new(
        vessel_name: Option<String>,
        voyage_number: Option<String>,
        arrival_date: Option<String>,
    ) -> Self {
        Self {
            vessel_name: clean(vessel_name),
            voyage_number: clean(voyage_number),
            arrival_date: clean(arrival_date),
        }
    }

    /// True when no field was resolved
    pub fn is_empty(&self) -> bool {
        self.vessel_name.is_none() && self.voyage_number.is_none() && self.arrival_date.is_none()
    }

    pub fn into_record(self, booking_id: &str) -> TrackingRecord {
        TrackingRecord::new(
            booking_id,
            self.vessel_name,
            self.voyage_number,
            self.arrival_date,
        )
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !is_unavailable(v))
}
