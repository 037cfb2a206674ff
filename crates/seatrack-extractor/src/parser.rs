//! Locate JSON objects embedded in agent text

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// Fenced code block holding a JSON object; agents often wrap answers this way
static FENCED_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[A-Za-z]*\s*(\{.*?\})\s*```").unwrap());

/// Parse every JSON object found in `text`, fenced blocks first
///
/// Fragments that fail to parse are skipped. When a brace-delimited fragment
/// is not valid JSON, the objects nested inside it are tried instead.
pub(crate) fn embedded_objects(text: &str) -> Vec<Map<String, Value>> {
    let mut objects = Vec::new();

    for caps in FENCED_OBJECT.captures_iter(text) {
        if let Some(obj) = parse_object(&caps[1]) {
            objects.push(obj);
        }
    }

    collect_braced(text, &mut objects);
    objects
}

/// Brace levels stripped from a malformed fragment before giving up
const MAX_RETRY_DEPTH: usize = 2;

fn collect_braced(text: &str, out: &mut Vec<Map<String, Value>>) {
    // Stack of (fragment, retry depth); pushed in reverse to keep text order
    let mut pending: Vec<(&str, usize)> =
        braced_fragments(text).into_iter().rev().map(|f| (f, 0)).collect();

    while let Some((fragment, depth)) = pending.pop() {
        if let Some(obj) = parse_object(fragment) {
            out.push(obj);
            continue;
        }
        if depth < MAX_RETRY_DEPTH {
            let inner = &fragment[1..fragment.len() - 1];
            pending.extend(
                braced_fragments(inner)
                    .into_iter()
                    .rev()
                    .map(|f| (f, depth + 1)),
            );
        }
    }
}

fn parse_object(fragment: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(fragment) {
        Ok(Value::Object(obj)) => Some(obj),
        Ok(_) => None,
        Err(e) => {
            debug!("Skipping unparseable JSON fragment: {}", e);
            None
        }
    }
}

/// Top-level balanced `{...}` spans, ignoring braces inside string literals
///
/// An unterminated object at the end of the text yields nothing.
pub(crate) fn braced_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = idx;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    fragments.push(&text[start..=idx]);
                }
            }
            _ => {}
        }
    }

    fragments
}
