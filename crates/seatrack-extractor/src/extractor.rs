//! The extraction cascade

use crate::mapping::{direct_fields, WRAPPER_KEYS};
use crate::parser::embedded_objects;
use crate::text::{natural_language, table_row};
use crate::types::{Extraction, Fields, Strategy};
use seatrack_domain::{RawAgentOutput, TrackingRecord};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Fields found so far, the strategy that found them, and wrappers crossed
type Found = (Fields, Strategy, Vec<&'static str>);

/// Extract a normalized record from raw agent output
///
/// Never fails: fields no strategy could resolve hold the sentinel.
pub fn extract(raw: &RawAgentOutput, booking_id: &str) -> TrackingRecord {
    extract_traced(raw, booking_id).record
}

/// Extract from a JSON value as returned by an agent runner
pub fn extract_value(value: &Value, booking_id: &str) -> TrackingRecord {
    extract(&RawAgentOutput::from(value), booking_id)
}

/// Extract and report which strategy produced the record
pub fn extract_traced(raw: &RawAgentOutput, booking_id: &str) -> Extraction {
    match cascade(raw, 0) {
        Some((fields, strategy, wrapper_path)) => {
            let record = fields.into_record(booking_id);
            info!(
                booking_id,
                strategy = %strategy,
                resolved = record.resolved_field_count(),
                "Extracted tracking record"
            );
            if !wrapper_path.is_empty() {
                debug!("Unwrapped result envelope: {}", wrapper_path.join("."));
            }
            Extraction {
                record,
                strategy,
                wrapper_path,
            }
        }
        None => {
            info!(booking_id, "No strategy matched agent output; returning sentinels");
            Extraction {
                record: TrackingRecord::unavailable(booking_id),
                strategy: Strategy::Default,
                wrapper_path: Vec::new(),
            }
        }
    }
}

/// Wrapper levels unwrapped before a mapping is treated as the answer
const MAX_WRAPPER_DEPTH: usize = 32;

/// Run the strategies in order; the first with any resolved field wins
///
/// Wrappers are always recursed into before the outer level's own
/// strategies are tried, even when the outer level would match a
/// higher-priority strategy.
fn cascade(raw: &RawAgentOutput, depth: usize) -> Option<Found> {
    if raw.is_empty() {
        return None;
    }

    if let RawAgentOutput::Mapping(map) = raw {
        for &key in wrapper_keys(depth) {
            if let Some(inner) = map.get(key) {
                if let Some((fields, strategy, mut path)) =
                    cascade(&RawAgentOutput::from(inner), depth + 1)
                {
                    path.insert(0, key);
                    return Some((fields, strategy, path));
                }
            }
        }

        let fields = direct_fields(map);
        if !fields.is_empty() {
            return Some((fields, Strategy::DirectFields, Vec::new()));
        }
    }

    let text = raw.as_text();
    for obj in embedded_objects(&text) {
        if let Some((fields, _, path)) = mapping_cascade(&obj, 0) {
            return Some((fields, Strategy::EmbeddedJson, path));
        }
    }

    let fields = table_row(&text);
    if !fields.is_empty() {
        return Some((fields, Strategy::TableRow, Vec::new()));
    }

    let fields = natural_language(&text);
    if !fields.is_empty() {
        return Some((fields, Strategy::NaturalLanguage, Vec::new()));
    }

    debug!("No strategy matched {} chars of agent output", text.len());
    None
}

/// Wrapper unwrap and direct fields only, for JSON found inside text
///
/// Text strategies are not re-run on fragments, so scanning a fragment can
/// never rediscover the fragment itself.
fn mapping_cascade(map: &Map<String, Value>, depth: usize) -> Option<Found> {
    for &key in wrapper_keys(depth) {
        if let Some(Value::Object(inner)) = map.get(key) {
            if let Some((fields, strategy, mut path)) = mapping_cascade(inner, depth + 1) {
                path.insert(0, key);
                return Some((fields, strategy, path));
            }
        }
    }

    let fields = direct_fields(map);
    if fields.is_empty() {
        None
    } else {
        Some((fields, Strategy::DirectFields, Vec::new()))
    }
}

/// Wrapper keys to try at `depth`; none once the depth limit is reached
fn wrapper_keys(depth: usize) -> &'static [&'static str] {
    if depth < MAX_WRAPPER_DEPTH {
        &WRAPPER_KEYS
    } else {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_wrapper_priority() {
        let raw = RawAgentOutput::from(json!({
            "data": {"vessel_name": "FROM DATA"},
            "result": {"vessel_name": "FROM RESULT"}
        }));
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.record.vessel_name, "FROM RESULT");
        assert_eq!(extraction.wrapper_path, vec!["result"]);
        assert_eq!(extraction.strategy, Strategy::DirectFields);
    }

    #[test]
    fn test_empty_wrapper_falls_through_to_next() {
        let raw = RawAgentOutput::from(json!({
            "result": {"status": "done"},
            "raw_result": {"vessel_name": "YM MANDATE"}
        }));
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.record.vessel_name, "YM MANDATE");
        assert_eq!(extraction.wrapper_path, vec!["raw_result"]);
    }

    #[test]
    fn test_deep_wrappers() {
        let raw = RawAgentOutput::from(json!({
            "result": {"data": {"raw_result": {"voyage_number": "0096W"}}}
        }));
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.record.voyage_number, "0096W");
        assert_eq!(extraction.wrapper_path, vec!["result", "data", "raw_result"]);
    }

    #[test]
    fn test_wrapper_holding_text() {
        let raw = RawAgentOutput::from(json!({
            "result": "Vessel Name: YM MANDATE. Voyage Number: 0096W."
        }));
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.strategy, Strategy::NaturalLanguage);
        assert_eq!(extraction.record.vessel_name, "YM MANDATE");
    }

    #[test]
    fn test_wrapper_recursed_before_outer_fields() {
        // The nested answer wins even though the outer mapping has direct fields
        let raw = RawAgentOutput::from(json!({
            "vessel_name": "OUTER",
            "result": "voyage number is 0001E"
        }));
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.record.voyage_number, "0001E");
        assert_eq!(extraction.record.vessel_name, "Not available");
        assert_eq!(extraction.strategy, Strategy::NaturalLanguage);
    }

    #[test]
    fn test_embedded_json_with_wrapper() {
        let raw = RawAgentOutput::text(
            "Final answer:\n```json\n{\"result\": {\"vessel_name\": \"YM MANDATE 0096W\"}}\n```",
        );
        let extraction = extract_traced(&raw, "B1");
        assert_eq!(extraction.strategy, Strategy::EmbeddedJson);
        assert_eq!(extraction.wrapper_path, vec!["result"]);
        assert_eq!(extraction.record.voyage_number, "0096W");
    }

    #[test]
    fn test_empty_text_is_default() {
        let extraction = extract_traced(&RawAgentOutput::text("   "), "B1");
        assert_eq!(extraction.strategy, Strategy::Default);
        assert_eq!(extraction.record, TrackingRecord::unavailable("B1"));
    }

    #[test]
    fn test_empty_mapping_is_default() {
        let extraction = extract_traced(&RawAgentOutput::from(json!({})), "B1");
        assert_eq!(extraction.strategy, Strategy::Default);
    }

    #[test]
    fn test_wrappers_beyond_depth_limit() {
        let mut value = json!({"vessel_name": "YM MANDATE"});
        for _ in 0..(MAX_WRAPPER_DEPTH + 8) {
            value = json!({ "result": value });
        }
        let extraction = extract_traced(&RawAgentOutput::from(value), "B1");
        assert_eq!(extraction.record.vessel_name, "YM MANDATE");
        assert!(extraction.wrapper_path.len() > MAX_WRAPPER_DEPTH);
    }

    #[test]
    fn test_extract_value() {
        let record = extract_value(&json!("Voyage Number: 0096W"), "B1");
        assert_eq!(record.voyage_number, "0096W");
    }
}
