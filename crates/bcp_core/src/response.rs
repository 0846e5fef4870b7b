//! Parsed model responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key used to carry unparsed model text.
pub const RAW_RESPONSE_KEY: &str = "raw_response";

/// A model response after best-effort JSON extraction.
///
/// Model output has no enforced schema, so the response is one of three
/// shapes. `RawText` is the sentinel for output that could not be parsed and
/// serializes as `{"raw_response": "<text>"}`.
///
/// # Examples
///
/// ```
/// use bcp_core::ParsedResponse;
/// use serde_json::json;
///
/// let parsed = ParsedResponse::from(json!({"raw_response": "no json"}));
/// assert!(parsed.is_sentinel());
///
/// let parsed = ParsedResponse::from(json!([{"Size": "M"}]));
/// assert_eq!(parsed.as_array().map(Vec::len), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ParsedResponse {
    /// JSON object
    Object(Map<String, Value>),
    /// JSON array
    Array(Vec<Value>),
    /// Unparsed model text
    RawText(String),
}

impl ParsedResponse {
    /// Whether the response carries unparsed text, either as the sentinel
    /// itself or as a `raw_response` key of an object. Such responses are
    /// never scored.
    pub fn is_sentinel(&self) -> bool {
        match self {
            Self::RawText(_) => true,
            Self::Object(map) => map.contains_key(RAW_RESPONSE_KEY),
            Self::Array(_) => false,
        }
    }

    /// The object payload, if this is an object.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The array payload, if this is an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The raw text, if this is the sentinel.
    pub fn as_raw_text(&self) -> Option<&str> {
        match self {
            Self::RawText(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a key of an object response.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short shape name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::RawText(_) => "raw text",
        }
    }

    /// Convert into a plain JSON value.
    pub fn to_value(&self) -> Value {
        self.clone().into()
    }
}

impl From<Value> for ParsedResponse {
    fn from(value: Value) -> Self {
        match value {
            // Only the sentinel's own shape maps back to it; other keys are kept.
            Value::Object(map) if map.len() == 1 && map.contains_key(RAW_RESPONSE_KEY) => {
                match map.get(RAW_RESPONSE_KEY) {
                    Some(Value::String(text)) => Self::RawText(text.clone()),
                    Some(other) => Self::RawText(other.to_string()),
                    None => Self::Object(map),
                }
            }
            Value::Object(map) => Self::Object(map),
            Value::Array(items) => Self::Array(items),
            Value::String(text) => Self::RawText(text),
            other => Self::RawText(other.to_string()),
        }
    }
}

impl From<ParsedResponse> for Value {
    fn from(response: ParsedResponse) -> Self {
        match response {
            ParsedResponse::Object(map) => Value::Object(map),
            ParsedResponse::Array(items) => Value::Array(items),
            ParsedResponse::RawText(text) => {
                let mut map = Map::new();
                map.insert(RAW_RESPONSE_KEY.to_string(), Value::String(text));
                Value::Object(map)
            }
        }
    }
}
