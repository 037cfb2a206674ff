//! Tracking record - the canonical output of a lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored in any field that could not be resolved
pub const NOT_AVAILABLE: &str = "Not available";

/// Returns true when a value carries no information.
///
/// Empty strings and the sentinel (in any letter case) both count as absent,
/// since agents are told to answer "Not available" for unknown fields.
///
/// # Examples
///
/// ```
/// use seatrack_domain::is_unavailable;
///
/// assert!(is_unavailable("  "));
/// assert!(is_unavailable("not available"));
/// assert!(!is_unavailable("YM MANDATE"));
/// ```
pub fn is_unavailable(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE)
}

/// The three fields an extraction derives; `booking_id` is always supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Vessel name
    VesselName,
    /// Voyage number (e.g. `0096W`)
    VoyageNumber,
    /// Arrival date/time as `YYYY-MM-DD HH:MM`
    ArrivalDate,
}

impl RecordField {
    /// All derived fields in record order
    pub const ALL: [RecordField; 3] = [
        RecordField::VesselName,
        RecordField::VoyageNumber,
        RecordField::ArrivalDate,
    ];

    /// Field name as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::VesselName => "vessel_name",
            RecordField::VoyageNumber => "voyage_number",
            RecordField::ArrivalDate => "arrival_date",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voyage and arrival information for one booking
///
/// Always holds exactly four string fields. A record is built once per
/// extraction and never mutated afterwards; a new run produces a new record
/// that replaces the persisted one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingRecord {
    /// Booking identifier supplied by the caller
    pub booking_id: String,

    /// Vessel name, or [`NOT_AVAILABLE`]
    pub vessel_name: String,

    /// Voyage number, or [`NOT_AVAILABLE`]
    pub voyage_number: String,

    /// Arrival date as `YYYY-MM-DD HH:MM`, or [`NOT_AVAILABLE`]
    pub arrival_date: String,
}

impl TrackingRecord {
    /// Build a record, substituting the sentinel for missing values
    ///
    /// # Examples
    ///
    /// ```
    /// use seatrack_domain::{TrackingRecord, NOT_AVAILABLE};
    ///
    /// let record = TrackingRecord::new(
    ///     "SINI25432400",
    ///     Some("YM MANDATE".to_string()),
    ///     None,
    ///     None,
    /// );
    /// assert_eq!(record.vessel_name, "YM MANDATE");
    /// assert_eq!(record.voyage_number, NOT_AVAILABLE);
    /// ```
    pub fn new(
        booking_id: impl Into<String>,
        vessel_name: Option<String>,
        voyage_number: Option<String>,
        arrival_date: Option<String>,
    ) -> Self {
        Self {
            booking_id: booking_id.into(),
            vessel_name: or_sentinel(vessel_name),
            voyage_number: or_sentinel(voyage_number),
            arrival_date: or_sentinel(arrival_date),
        }
    }

    /// A record where every derived field is the sentinel
    pub fn unavailable(booking_id: impl Into<String>) -> Self {
        Self::new(booking_id, None, None, None)
    }

    /// Raw value of a derived field
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::VesselName => &self.vessel_name,
            RecordField::VoyageNumber => &self.voyage_number,
            RecordField::ArrivalDate => &self.arrival_date,
        }
    }

    /// Value of a derived field, or `None` when it holds the sentinel
    pub fn value(&self, field: RecordField) -> Option<&str> {
        let value = self.get(field);
        if is_unavailable(value) {
            None
        } else {
            Some(value)
        }
    }

    /// Whether a derived field carries a real value
    pub fn is_resolved(&self, field: RecordField) -> bool {
        self.value(field).is_some()
    }

    /// Number of derived fields that carry a real value (0..=3)
    pub fn resolved_field_count(&self) -> usize {
        RecordField::ALL
            .iter()
            .filter(|field| self.is_resolved(**field))
            .count()
    }

    /// True when at least one derived field is resolved
    pub fn has_any_resolved(&self) -> bool {
        self.resolved_field_count() > 0
    }

    /// True when every derived field is resolved
    pub fn is_complete(&self) -> bool {
        self.resolved_field_count() == RecordField::ALL.len()
    }
}

fn or_sentinel(value: Option<String>) -> String {
    match value {
        Some(v) if !is_unavailable(&v) => v.trim().to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
