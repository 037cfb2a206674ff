//! Text-only strategies: result table rows and natural-language phrases

use crate::normalize::normalize_arrival_date;
use crate::splitter::{split_combined, split_table_vessel};
use crate::types::Fields;
use once_cell::sync::Lazy;
use regex::Regex;

/// Vessel, three don't-care columns, then the timestamp column
const MIN_TABLE_COLUMNS: usize = 5;

static TABLE_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}(?::\d{2})?$").unwrap());

static VESSEL_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\bvessel(?:[\s_]+name)?["']?\s*(?:[:=]|\bis\b)\s*["']?([A-Z0-9](?:[A-Z0-9\-]|[ ][A-Z0-9\-])*)"#,
    )
    .unwrap()
});

static VOYAGE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\bvoyage(?:[\s_]*(?:number|num|no\.?|#))?["']?\s*(?:[:=]|\bis\b)\s*["']?([A-Z0-9][A-Z0-9\-]*)"#,
    )
    .unwrap()
});

static ARRIVAL_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:arrival|\betb\b|\beta\b|berthing)[^\n]{0,80}?(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2})")
        .unwrap()
});

/// Words that end a vessel name captured from running prose
const PHRASE_STOPWORDS: &[&str] = &[
    "and", "with", "voyage", "arriving", "arrival", "arrives", "which", "is", "was", "on", "at",
    "eta", "etb", "departing", "currently", "scheduled",
];

/// First pipe-delimited row whose last column is a timestamp
pub(crate) fn table_row(text: &str) -> Fields {
    for line in text.lines() {
        let line = line.trim();
        if !line.contains('|') {
            continue;
        }

        let mut cells: Vec<&str> = line.trim_matches('|').split('|').map(str::trim).collect();
        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        if cells.len() < MIN_TABLE_COLUMNS {
            continue;
        }

        let first = cells[0];
        let last = cells[cells.len() - 1];
        if !first.chars().any(char::is_alphanumeric) || !TABLE_TIMESTAMP.is_match(last) {
            continue;
        }

        let (vessel, voyage) = split_table_vessel(first);
        let fields = Fields::new(Some(vessel), voyage, normalize_arrival_date(last));
        if !fields.is_empty() {
            return fields;
        }
    }

    Fields::default()
}

/// Independent phrase matches for each field
pub(crate) fn natural_language(text: &str) -> Fields {
    let vessel = VESSEL_PHRASE
        .captures_iter(text)
        .find_map(|caps| trim_prose(&caps[1]));

    let voyage = VOYAGE_PHRASE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|token| token.chars().any(|c| c.is_ascii_digit()));

    let arrival = ARRIVAL_PHRASE
        .captures_iter(text)
        .find_map(|caps| normalize_arrival_date(&caps[1]));

    // A trailing voyage token on the vessel only fills an empty voyage slot
    let (vessel, voyage) = match (vessel, voyage) {
        (Some(combined), None) => {
            let (vessel, voyage) = split_combined(&combined);
            (Some(vessel), voyage)
        }
        other => other,
    };

    Fields::new(vessel, voyage, arrival)
}

/// Articles dropped from the front of a captured vessel name
const LEADING_ARTICLES: &[&str] = &["the", "a", "an"];

/// Cut a captured vessel name at the first connective word
fn trim_prose(captured: &str) -> Option<String> {
    let mut words: Vec<&str> = captured
        .split_whitespace()
        .take_while(|word| !PHRASE_STOPWORDS.contains(&word.to_ascii_lowercase().as_str()))
        .collect();

    if words.len() > 1 && LEADING_ARTICLES.contains(&words[0].to_ascii_lowercase().as_str()) {
        words.remove(0);
    }

    if words.iter().any(|word| word.chars().any(char::is_alphabetic)) {
        Some(words.join(" "))
    } else {
        None
    }
}
