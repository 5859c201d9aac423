// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON object extraction from free-text model output
//!
//! Chat models regularly wrap their JSON answer in prose or markdown
//! despite instructions. The extractor takes the greedy match from the
//! first `{` to the last `}` and parses that substring. The greedy match
//! is the documented contract; it does not attempt balanced-brace
//! scanning.

use regex::Regex;
use serde_json::{json, Value};

/// Outcome of extracting a JSON object from raw model output
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A JSON object was found and parsed
    Parsed(Value),
    /// No `{...}`-shaped substring exists in the reply
    NoJsonFound,
    /// A candidate substring was found but failed to parse
    ParseFailed(String),
}

/// Extractor holding the compiled object pattern
#[derive(Debug, Clone)]
pub struct JsonExtractor {
    object_pattern: Regex,
}

impl JsonExtractor {
    pub fn new() -> Self {
        Self {
            // (?s) so the match spans newlines
            object_pattern: Regex::new(r"(?s)\{.*\}").unwrap(),
        }
    }

    /// Extract and parse the first greedy `{...}` substring
    pub fn extract(&self, raw: &str) -> Extraction {
        let candidate = match self.object_pattern.find(raw) {
            Some(m) => m.as_str(),
            None => return Extraction::NoJsonFound,
        };

        match serde_json::from_str::<Value>(candidate) {
            Ok(value) => Extraction::Parsed(value),
            Err(e) => Extraction::ParseFailed(e.to_string()),
        }
    }

    /// Extract from raw output and shape the endpoint response body
    ///
    /// Soft failures carry the full unparsed text in `raw` for
    /// debuggability.
    pub fn extract_to_response(&self, raw: &str) -> Value {
        match self.extract(raw) {
            Extraction::Parsed(value) => value,
            Extraction::NoJsonFound => json!({
                "error": "No JSON object found",
                "raw": raw,
            }),
            Extraction::ParseFailed(message) => json!({
                "error": format!("JSON parsing failed: {}", message),
                "raw": raw,
            }),
        }
    }
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_object_passes_through() {
        let extractor = JsonExtractor::new();
        let raw = r#"{"layout":"60%","soundProfile":"thocky"}"#;

        match extractor.extract(raw) {
            Extraction::Parsed(value) => {
                assert_eq!(value["layout"], "60%");
                assert_eq!(value["soundProfile"], "thocky");
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let extractor = JsonExtractor::new();
        let raw = "Sure! Here is your build:\n{\"layout\": \"tkl\", \"budget\": \"200\"}\nEnjoy!";

        match extractor.extract(raw) {
            Extraction::Parsed(value) => {
                assert_eq!(value["layout"], "tkl");
                assert_eq!(value["budget"], "200");
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_object_recovered_whole() {
        let extractor = JsonExtractor::new();
        let raw = r#"intro text {"components": {"case": "tofu65"}, "totalPrice": 240} bye"#;

        match extractor.extract(raw) {
            Extraction::Parsed(value) => {
                assert_eq!(value["components"]["case"], "tofu65");
                assert_eq!(value["totalPrice"], 240);
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_no_brace_at_all() {
        let extractor = JsonExtractor::new();
        assert_eq!(
            extractor.extract("I cannot help with that."),
            Extraction::NoJsonFound
        );
    }

    #[test]
    fn test_invalid_json_reports_parse_failure() {
        let extractor = JsonExtractor::new();
        let raw = "{not valid json}";

        match extractor.extract(raw) {
            Extraction::ParseFailed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected ParseFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_greedy_match_spans_multiple_objects() {
        // Known-fragile documented behavior: two unrelated objects in one
        // reply produce one invalid greedy span.
        let extractor = JsonExtractor::new();
        let raw = r#"{"a": 1} and also {"b": 2}"#;

        match extractor.extract(raw) {
            Extraction::ParseFailed(_) => {}
            other => panic!("expected ParseFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_response_shape_no_json() {
        let extractor = JsonExtractor::new();
        let raw = "plain refusal";
        let body = extractor.extract_to_response(raw);

        assert_eq!(body["error"], "No JSON object found");
        assert_eq!(body["raw"], raw);
    }

    #[test]
    fn test_response_shape_parse_failed() {
        let extractor = JsonExtractor::new();
        let raw = "here {broken: } there";
        let body = extractor.extract_to_response(raw);

        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("JSON parsing failed"), "got {}", error);
        assert_eq!(body["raw"], raw);
    }

    #[test]
    fn test_response_shape_success_is_verbatim() {
        let extractor = JsonExtractor::new();
        // Extra keys pass through uninspected; the schema is not enforced
        let raw = r#"{"layout": "65%", "surprise": true}"#;
        let body = extractor.extract_to_response(raw);

        assert_eq!(body["layout"], "65%");
        assert_eq!(body["surprise"], true);
        assert!(body.get("error").is_none());
    }

    #[test]
    fn test_multiline_object() {
        let extractor = JsonExtractor::new();
        let raw = "{\n  \"layout\": \"full\",\n  \"budget\": \"150\"\n}";

        match extractor.extract(raw) {
            Extraction::Parsed(value) => assert_eq!(value["layout"], "full"),
            other => panic!("expected Parsed, got {:?}", other),
        }
    }
}
