//! Best-effort extraction of JSON from model responses.
//!
//! Models wrap JSON in markdown fences, prepend prose, or answer in plain
//! text. [`parse_response`] never fails: anything it cannot turn into a JSON
//! object or array comes back as [`ParsedResponse::RawText`].

use bcp_core::ParsedResponse;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*\n(.*?)\n```").expect("valid json fence pattern"));
static OBJECT_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```\s*\n(\{.*?\})\s*\n```").expect("valid object fence pattern")
});
static TOTAL_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(\{[^}]*"total"[^}]*\})"#).expect("valid total object pattern")
});

/// Locate the JSON text inside a model response.
///
/// Strategies, first match wins:
/// 1. A fenced block tagged `json`
/// 2. A fenced block whose body is a single object
/// 3. A brace-delimited span without nested braces containing `"total"`
/// 4. The whole trimmed response, if it starts with `{` and ends with `}`
///
/// # Examples
///
/// ```
/// use bcp_pipeline::extract_json_candidate;
///
/// let response = "Here you go:\n```json\n[1, 2]\n```\nAnything else?";
/// assert_eq!(extract_json_candidate(response), Some("[1, 2]"));
/// assert_eq!(extract_json_candidate("no json here"), None);
/// ```
pub fn extract_json_candidate(response: &str) -> Option<&str> {
    for pattern in [&*JSON_FENCE, &*OBJECT_FENCE, &*TOTAL_OBJECT] {
        if let Some(found) = pattern.captures(response).and_then(|caps| caps.get(1)) {
            return Some(found.as_str().trim());
        }
    }

    let trimmed = response.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}')).then_some(trimmed)
}

/// Parse a model response into structured JSON.
///
/// A located candidate that is not valid JSON, or that parses to a scalar,
/// yields the raw-text sentinel carrying the full response.
///
/// # Examples
///
/// ```
/// use bcp_core::ParsedResponse;
/// use bcp_pipeline::parse_response;
///
/// let parsed = parse_response("Result: {\"step\": \"UI\", \"total\": 3} done");
/// assert_eq!(parsed.get("total"), Some(&serde_json::json!(3)));
///
/// let parsed = parse_response("I could not score this story.");
/// assert!(parsed.is_sentinel());
/// ```
pub fn parse_response(response: &str) -> ParsedResponse {
    let Some(candidate) = extract_json_candidate(response) else {
        debug!(response_length = response.len(), "No JSON found in response");
        return ParsedResponse::RawText(response.to_string());
    };

    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(value) => {
            let parsed = ParsedResponse::from(value);
            if parsed.as_raw_text().is_some() {
                warn!("Response JSON is not an object or array, returning raw text");
                ParsedResponse::RawText(response.to_string())
            } else {
                parsed
            }
        }
        Err(e) => {
            warn!(error = %e, "Response is not valid JSON, returning raw text");
            ParsedResponse::RawText(response.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_fence_wins_over_bare_object() {
        let response = "{\"total\": 1}\n```json\n{\"total\": 2}\n```";
        assert_eq!(parse_response(response).get("total"), Some(&json!(2)));
    }

    #[test]
    fn json_fence_may_hold_an_array() {
        let response = "```json\n[{\"Size\": \"M\"}]\n```";
        assert_eq!(
            parse_response(response),
            ParsedResponse::Array(vec![json!({"Size": "M"})])
        );
    }

    #[test]
    fn untagged_fence_with_object() {
        let response = "Scores:\n```\n{\"Static\": 5, \"Dynamic\": 6}\n```\n";
        assert_eq!(parse_response(response).get("Dynamic"), Some(&json!(6)));
    }

    #[test]
    fn untagged_fence_with_array_falls_through() {
        let response = "```\n[1, 2]\n```";
        assert!(parse_response(response).is_sentinel());
    }

    #[test]
    fn whole_text_object() {
        let response = "  {\"a\": {\"b\": 1}}\n";
        assert_eq!(parse_response(response).get("a"), Some(&json!({"b": 1})));
    }

    #[test]
    fn invalid_candidate_keeps_full_text() {
        let response = "```json\n{not json}\n```";
        assert_eq!(
            parse_response(response),
            ParsedResponse::RawText(response.to_string())
        );
    }

    #[test]
    fn fenced_scalar_is_sentinel() {
        let response = "```json\n\"just a string\"\n```";
        assert_eq!(
            parse_response(response),
            ParsedResponse::RawText(response.to_string())
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        for response in [
            "```json\n{\"total\": 3}\n```",
            "prose only",
            "{\"total\": 1, \"step\": \"x\"}",
            "```json\n{broken\n```",
        ] {
            assert_eq!(parse_response(response), parse_response(response));
        }
    }
}
