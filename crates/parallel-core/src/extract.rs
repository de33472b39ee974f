//! JSON payload extraction from raw completion text.
//!
//! Completion services wrap JSON in several ways: bare, inside a markdown
//! code fence, or surrounded by explanatory prose. Extraction runs a fixed
//! sequence of recovery steps:
//! 1. Strip a leading ```` ```json ```` / ```` ``` ```` marker and a trailing ```` ``` ````
//! 2. Slice from the first `{` to the last `}`
//! 3. Parse with `serde_json`
//! 4. On failure, strip trailing commas and parse again
//!
//! The result is a [`ParseOutcome`]; shape validation happens in the
//! callers.

use serde_json::Value;

use crate::error::Unparsable;

/// Result of extracting JSON from completion text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A JSON value was recovered.
    Parsed(Value),
    /// Nothing usable was found.
    Unparsable(Unparsable),
}

impl ParseOutcome {
    /// Convert into a `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<Value, Unparsable> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Unparsable(reason) => Err(reason),
        }
    }
}

/// Extract a JSON value from completion text.
pub fn parse_payload(raw: &str) -> ParseOutcome {
    let unfenced = strip_code_fence(raw);
    if unfenced.is_empty() {
        return ParseOutcome::Unparsable(Unparsable::Empty);
    }

    let Some(span) = slice_object_span(unfenced) else {
        return ParseOutcome::Unparsable(Unparsable::NoJsonObject);
    };

    let first_error = match serde_json::from_str::<Value>(span) {
        Ok(value) => return ParseOutcome::Parsed(value),
        Err(e) => e,
    };

    let repaired = strip_trailing_commas(span);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(_) => ParseOutcome::Unparsable(Unparsable::InvalidJson(first_error.to_string())),
    }
}

/// Remove a surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }

    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim()
}

/// Slice from the first `{` to the last `}` inclusive.
fn slice_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Strip commas that directly precede `}` or `]` (a common model error).
///
/// Commas inside string literals are left alone.
fn strip_trailing_commas(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            ',' => {
                let rest = text.get(i.saturating_add(1)..).unwrap_or("");
                let next = rest.trim_start().chars().next();
                if !matches!(next, Some('}' | ']')) {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Option<Value> {
        match parse_payload(raw) {
            ParseOutcome::Parsed(v) => Some(v),
            ParseOutcome::Unparsable(_) => None,
        }
    }

    #[test]
    fn parses_pure_json() {
        let value = parsed(r#"{"timelines": []}"#);
        assert!(value.is_some());
    }

    #[test]
    fn parses_json_in_fenced_block() {
        let raw = "```json\n{\"insight\": \"x\"}\n```";
        let value = parsed(raw).unwrap_or_default();
        assert_eq!(value.get("insight").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn parses_json_in_plain_fence() {
        let raw = "```\n{\"insight\": \"y\"}\n```";
        let value = parsed(raw).unwrap_or_default();
        assert_eq!(value.get("insight").and_then(Value::as_str), Some("y"));
    }

    #[test]
    fn parses_json_surrounded_by_prose() {
        let raw = "Sure! Here are your timelines:\n{\"insight\": \"z\"}\nHope this helps.";
        let value = parsed(raw).unwrap_or_default();
        assert_eq!(value.get("insight").and_then(Value::as_str), Some("z"));
    }

    #[test]
    fn parses_fence_inside_prose() {
        let raw = "Here you go:\n```json\n{\"insight\": \"w\"}\n```\nEnjoy.";
        let value = parsed(raw).unwrap_or_default();
        assert_eq!(value.get("insight").and_then(Value::as_str), Some("w"));
    }

    #[test]
    fn repairs_trailing_commas() {
        let raw = r#"{"events": [{"title": "a",}, {"title": "b"},],}"#;
        let value = parsed(raw).unwrap_or_default();
        let events = value.get("events").and_then(Value::as_array).map(Vec::len);
        assert_eq!(events, Some(2));
    }

    #[test]
    fn trailing_comma_repair_respects_strings() {
        let input = r#"{"quote": "wait, }", "n": 1,}"#;
        assert_eq!(strip_trailing_commas(input), r#"{"quote": "wait, }", "n": 1}"#);
    }

    #[test]
    fn trailing_comma_repair_handles_escaped_quotes() {
        let input = r#"{"q": "say \"hi,\" ]", "a": [1, 2,]}"#;
        assert_eq!(strip_trailing_commas(input), r#"{"q": "say \"hi,\" ]", "a": [1, 2]}"#);
    }

    #[test]
    fn garbage_is_unparsable() {
        assert_eq!(
            parse_payload("I could not think of anything."),
            ParseOutcome::Unparsable(Unparsable::NoJsonObject)
        );
    }

    #[test]
    fn empty_is_unparsable() {
        assert_eq!(parse_payload("   "), ParseOutcome::Unparsable(Unparsable::Empty));
        assert_eq!(parse_payload("```json\n```"), ParseOutcome::Unparsable(Unparsable::Empty));
    }

    #[test]
    fn broken_json_is_unparsable() {
        let outcome = parse_payload("{\"timelines\": [ {\"name\": }");
        assert!(matches!(outcome, ParseOutcome::Unparsable(Unparsable::InvalidJson(_))));
    }

    #[test]
    fn reversed_braces_are_unparsable() {
        assert_eq!(
            parse_payload("} nothing {"),
            ParseOutcome::Unparsable(Unparsable::NoJsonObject)
        );
    }
}
