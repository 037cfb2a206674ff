//! Raw agent output - whatever the browser agent hands back

use serde_json::{Map, Value};

/// Output of an agent run before extraction
///
/// Agents answer with free text (sentences, markdown tables, fenced JSON) or
/// with a nested mapping that may wrap the real answer in metadata envelopes.
/// Extraction strategies match on this enum instead of inspecting types at
/// runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAgentOutput {
    /// Textual blob
    Text(String),

    /// JSON object, possibly nested
    Mapping(Map<String, Value>),
}

impl RawAgentOutput {
    /// Wrap a text blob
    pub fn text(text: impl Into<String>) -> Self {
        RawAgentOutput::Text(text.into())
    }

    /// The mapping, if this output is one
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            RawAgentOutput::Mapping(map) => Some(map),
            RawAgentOutput::Text(_) => None,
        }
    }

    /// Render as text; mappings are rendered as compact JSON
    pub fn as_text(&self) -> String {
        match self {
            RawAgentOutput::Text(text) => text.clone(),
            RawAgentOutput::Mapping(map) => {
                serde_json::to_string(map).unwrap_or_default()
            }
        }
    }

    /// True for empty text or an empty mapping
    pub fn is_empty(&self) -> bool {
        match self {
            RawAgentOutput::Text(text) => text.trim().is_empty(),
            RawAgentOutput::Mapping(map) => map.is_empty(),
        }
    }
}

impl From<Value> for RawAgentOutput {
    /// Objects become mappings, strings become text, `null` becomes empty
    /// text and any other value becomes its JSON rendering.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawAgentOutput::Mapping(map),
            Value::String(text) => RawAgentOutput::Text(text),
            Value::Null => RawAgentOutput::Text(String::new()),
            other => RawAgentOutput::Text(other.to_string()),
        }
    }
}

impl From<&Value> for RawAgentOutput {
    fn from(value: &Value) -> Self {
        RawAgentOutput::from(value.clone())
    }
}

impl From<String> for RawAgentOutput {
    fn from(text: String) -> Self {
        RawAgentOutput::Text(text)
    }
}

impl From<&str> for RawAgentOutput {
    fn from(text: &str) -> Self {
        RawAgentOutput::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for RawAgentOutput {
    fn from(map: Map<String, Value>) -> Self {
        RawAgentOutput::Mapping(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_object_value() {
        let raw = RawAgentOutput::from(json!({"result": "x"}));
        assert!(raw.as_mapping().is_some());
        assert_eq!(raw.as_text(), r#"{"result":"x"}"#);
    }

    #[test]
    fn test_from_scalar_values() {
        assert_eq!(RawAgentOutput::from(json!("hello")), RawAgentOutput::text("hello"));
        assert_eq!(RawAgentOutput::from(json!(null)), RawAgentOutput::text(""));
        assert_eq!(RawAgentOutput::from(json!(42)), RawAgentOutput::text("42"));
        assert_eq!(
            RawAgentOutput::from(json!([1, 2])),
            RawAgentOutput::text("[1,2]")
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(RawAgentOutput::text("  \n").is_empty());
        assert!(RawAgentOutput::Mapping(Map::new()).is_empty());
        assert!(!RawAgentOutput::text("x").is_empty());
    }
}
