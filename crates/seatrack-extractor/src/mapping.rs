//! Field lookup on structured (mapping) agent output

use crate::normalize::normalize_arrival_date;
use crate::splitter::split_combined;
use crate::types::Fields;
use seatrack_domain::is_unavailable;
use serde_json::{Map, Value};

/// Envelope keys agents wrap their answer in, in priority order
pub(crate) const WRAPPER_KEYS: [&str; 3] = ["result", "raw_result", "data"];

/// Keys holding a list of vessel/voyage entries
const VOYAGE_LIST_KEYS: [&str; 3] = ["vessel_voyage", "vessel_voyages", "voyages"];

/// Arrival date aliases in priority order
const ARRIVAL_ALIASES: [&str; 3] = ["arrival_date_time", "arrival_date", "etb"];

/// Keys that may carry vessel name and voyage number in one string
const COMBINED_KEYS: [&str; 2] = ["vessel_voyage", "vessel"];

/// One entry of a voyage list
enum Entry<'a> {
    Mapping(&'a Map<String, Value>),
    Combined(&'a str),
}

/// Resolve fields from a mapping that is itself the answer
///
/// A voyage list wins over top-level fields; its first entry is used.
pub(crate) fn direct_fields(map: &Map<String, Value>) -> Fields {
    if let Some(entry) = first_voyage_entry(map) {
        return match entry {
            Entry::Mapping(entry) => entry_fields(entry),
            Entry::Combined(text) => {
                let (vessel, voyage) = split_combined(text);
                Fields::new(Some(vessel), voyage, None)
            }
        };
    }

    if exposes_record_fields(map) {
        return entry_fields(map);
    }

    Fields::default()
}

fn first_voyage_entry(map: &Map<String, Value>) -> Option<Entry<'_>> {
    VOYAGE_LIST_KEYS.iter().find_map(|key| match map.get(*key)? {
        Value::Array(items) => match items.first()? {
            Value::Object(entry) => Some(Entry::Mapping(entry)),
            Value::String(text) if !is_unavailable(text) => Some(Entry::Combined(text)),
            _ => None,
        },
        Value::Object(entry) => Some(Entry::Mapping(entry)),
        _ => None,
    })
}

fn exposes_record_fields(map: &Map<String, Value>) -> bool {
    ["vessel_name", "voyage_number"]
        .iter()
        .chain(ARRIVAL_ALIASES.iter())
        .chain(COMBINED_KEYS.iter())
        .any(|key| map.contains_key(*key))
}

/// Resolve fields from a single vessel/voyage entry
fn entry_fields(entry: &Map<String, Value>) -> Fields {
    let vessel = text_value(entry, "vessel_name");
    let voyage = text_value(entry, "voyage_number");

    let (vessel, voyage) = match (vessel, voyage) {
        (Some(vessel), Some(voyage)) => (Some(vessel), Some(voyage)),
        (Some(combined), None) => {
            let (vessel, voyage) = split_combined(&combined);
            (Some(vessel), voyage)
        }
        (None, Some(voyage)) => (None, Some(voyage)),
        (None, None) => match COMBINED_KEYS.iter().find_map(|key| text_value(entry, key)) {
            Some(combined) => {
                let (vessel, voyage) = split_combined(&combined);
                (Some(vessel), voyage)
            }
            None => (None, None),
        },
    };

    let arrival = ARRIVAL_ALIASES
        .iter()
        .find_map(|key| text_value(entry, key))
        .and_then(|raw| normalize_arrival_date(&raw));

    Fields::new(vessel, voyage, arrival)
}

/// String or number at `key`, unless empty or the sentinel
fn text_value(map: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    if is_unavailable(&text) {
        None
    } else {
        Some(text)
    }
}
