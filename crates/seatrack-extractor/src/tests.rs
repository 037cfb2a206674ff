//! Scenario tests for the extraction cascade

#[cfg(test)]
mod tests {
    use crate::{extract, extract_traced, Strategy};
    use seatrack_domain::{RawAgentOutput, TrackingRecord, NOT_AVAILABLE};
    use serde_json::json;
    use std::time::{Duration, Instant};

    const BOOKING: &str = "SINI25432400";

    fn expected() -> TrackingRecord {
        TrackingRecord {
            booking_id: BOOKING.to_string(),
            vessel_name: "YM MANDATE".to_string(),
            voyage_number: "0096W".to_string(),
            arrival_date: "2025-03-28 10:38".to_string(),
        }
    }

    #[test]
    fn test_voyage_list_mapping() {
        let raw = RawAgentOutput::from(json!({
            "vessel_voyage": [{
                "vessel_name": "YM MANDATE",
                "voyage_number": "0096W",
                "arrival_date_time": "2025-03-28 10:38"
            }]
        }));

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::DirectFields);
    }

    #[test]
    fn test_pipe_table_row() {
        let raw = RawAgentOutput::text(
            "Search results:\n\
             | YM MANDATE 0096W | PS3 | SINGAPORE | 2025-03-17 11:00 | NHAVA SHEVA, INDIA | 2025-03-28 10:38 |\n",
        );

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::TableRow);
    }

    #[test]
    fn test_natural_language_sentence() {
        let raw = RawAgentOutput::text(
            "Vessel Name: YM MANDATE. Voyage Number: 0096W. Arrival Date and Time (ETB): 2025-03-28 10:38",
        );

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::NaturalLanguage);
    }

    #[test]
    fn test_fenced_json_answer() {
        let raw = RawAgentOutput::text(
            r#"I found the booking.

```json
{
  "booking_id": "SINI25432400",
  "vessel_name": "YM MANDATE",
  "voyage_number": "0096W",
  "arrival_date": "2025-03-28T10:38"
}
```"#,
        );

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::EmbeddedJson);
    }

    #[test]
    fn test_agent_history_envelope() {
        let raw = RawAgentOutput::from(json!({
            "steps": 14,
            "is_done": true,
            "result": {
                "raw_result": "{\"vessel_voyage\": [{\"vessel_name\": \"YM MANDATE 0096W\", \"etb\": \"2025-03-28 10:38\"}]}"
            }
        }));

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.wrapper_path, vec!["result", "raw_result"]);
        assert_eq!(extraction.strategy, Strategy::EmbeddedJson);
    }

    #[test]
    fn test_no_patterns_gives_sentinels() {
        let raw = RawAgentOutput::text("The website returned an error page. Please try again later.");
        let record = extract(&raw, BOOKING);

        assert_eq!(record.booking_id, BOOKING);
        assert_eq!(record.vessel_name, NOT_AVAILABLE);
        assert_eq!(record.voyage_number, NOT_AVAILABLE);
        assert_eq!(record.arrival_date, NOT_AVAILABLE);
    }

    #[test]
    fn test_direct_fields_beat_conflicting_prose() {
        let raw = RawAgentOutput::from(json!({
            "vessel_name": "YM MANDATE",
            "voyage_number": "0096W",
            "arrival_date": "2025-03-28 10:38",
            "notes": "Vessel Name: WRONG SHIP. Voyage Number: 9999E. Arrival date is 2030-01-01 00:00"
        }));

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::DirectFields);
    }

    #[test]
    fn test_embedded_json_beats_table_and_prose() {
        let raw = RawAgentOutput::text(
            "Vessel Name: WRONG SHIP\n\
             | OTHER SHIP 0001E | a | b | c | 2030-01-01 00:00 |\n\
             {\"vessel_name\": \"YM MANDATE\", \"voyage_number\": \"0096W\", \"etb\": \"2025-03-28 10:38\"}",
        );

        let extraction = extract_traced(&raw, BOOKING);
        assert_eq!(extraction.record, expected());
        assert_eq!(extraction.strategy, Strategy::EmbeddedJson);
    }

    #[test]
    fn test_partial_match_stops_cascade() {
        // Only the voyage number is in the JSON; the prose vessel name is not consulted
        let raw = RawAgentOutput::text(
            "{\"voyage_number\": \"0096W\"} The vessel name is YM MANDATE.",
        );

        let record = extract(&raw, BOOKING);
        assert_eq!(record.voyage_number, "0096W");
        assert_eq!(record.vessel_name, NOT_AVAILABLE);
    }

    #[test]
    fn test_date_alias_priority() {
        let raw = RawAgentOutput::from(json!({
            "vessel_voyage": [{
                "vessel_name": "YM MANDATE 0096W",
                "etb": "2025-03-30 09:00",
                "arrival_date_time": "2025-03-28 10:38"
            }]
        }));

        assert_eq!(extract(&raw, BOOKING), expected());
    }

    #[test]
    fn test_booking_id_never_taken_from_input() {
        let raw = RawAgentOutput::from(json!({
            "booking_id": "SOMETHING ELSE",
            "vessel_name": "YM MANDATE"
        }));

        assert_eq!(extract(&raw, BOOKING).booking_id, BOOKING);
    }

    #[test]
    fn test_malformed_json_is_skipped() {
        let raw = RawAgentOutput::text(
            "```json\n{\"vessel_name\": \"YM MANDATE\",}\n```\nVoyage Number: 0096W",
        );

        let record = extract(&raw, BOOKING);
        assert_eq!(record.voyage_number, "0096W");
    }

    #[test]
    fn test_deep_malformed_braces() {
        let depth = 20_000;
        let text = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));

        let extraction = extract_traced(&RawAgentOutput::text(text), BOOKING);
        assert_eq!(extraction.strategy, Strategy::Default);
        assert_eq!(extraction.record, TrackingRecord::unavailable(BOOKING));
    }

    #[test]
    fn test_deep_result_envelopes_in_text() {
        // Deeper than serde_json's recursion limit, so no fragment parses
        let depth = 20_000;
        let text = format!(
            "{}{{\"vessel_name\":\"YM MANDATE\"}}{}",
            "{\"result\":".repeat(depth),
            "}".repeat(depth)
        );

        let record = extract(&RawAgentOutput::text(text), BOOKING);
        assert_eq!(record.booking_id, BOOKING);
        assert_eq!(record.vessel_name, "YM MANDATE");
        assert_eq!(record.voyage_number, NOT_AVAILABLE);
    }

    #[test]
    fn test_large_unbalanced_input_is_fast() {
        let half = 500_000;
        let text = format!("{}{}", "{".repeat(half), "} {".repeat(half / 3));

        let started = Instant::now();
        let record = extract(&RawAgentOutput::text(text), BOOKING);
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(record, TrackingRecord::unavailable(BOOKING));
    }

    #[test]
    fn test_unrecoverable_date_is_sentinel() {
        let raw = RawAgentOutput::from(json!({
            "vessel_name": "YM MANDATE",
            "voyage_number": "0096W",
            "arrival_date": "late March"
        }));

        let record = extract(&raw, BOOKING);
        assert_eq!(record.vessel_name, "YM MANDATE");
        assert_eq!(record.arrival_date, NOT_AVAILABLE);
    }
}

#[cfg(test)]
mod proptests {
    use crate::extract;
    use proptest::prelude::*;
    use seatrack_domain::{RawAgentOutput, RecordField};
    use serde_json::{Map, Value};

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::from(n)),
            ".{0,24}".prop_map(Value::String),
            "(YM MANDATE|0096W|2025-03-28 10:38|Not available|\\{|\\}|\\|)"
                .prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            let keys = "(result|raw_result|data|vessel_voyage|vessel_name|voyage_number|etb|arrival_date|[a-z]{1,6})";
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map(keys, inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    proptest! {
        /// Property: Arbitrary text always yields four filled string fields
        #[test]
        fn test_extract_total_on_text(text in "(.|\n|\\||\\{|\\}|`){0,200}") {
            let record = extract(&RawAgentOutput::text(text), "B1");
            prop_assert_eq!(record.booking_id.as_str(), "B1");
            for field in RecordField::ALL {
                prop_assert!(!record.get(field).trim().is_empty());
            }
        }

        /// Property: Arbitrary nested mappings never break extraction
        #[test]
        fn test_extract_total_on_mappings(value in arb_json()) {
            let record = extract(&RawAgentOutput::from(value), "B1");
            prop_assert_eq!(record.booking_id.as_str(), "B1");
            for field in RecordField::ALL {
                prop_assert!(!record.get(field).trim().is_empty());
            }
        }
    }
}
