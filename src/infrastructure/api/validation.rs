//! Formatting of 422 validation responses.
//!
//! The API emits validation failures in a handful of shapes (FastAPI-style
//! `detail` lists, a bare `message`, or an `errors` map). These helpers turn
//! any of them into a readable message plus a flat field→message map, and
//! never fail on malformed input.

use serde_json::Value;
use std::collections::BTreeMap;

/// Build a human-readable message from a 422 response body.
pub fn format_validation_message(body: &Value) -> String {
    // FastAPI/Pydantic shape: "detail" as a string or a list of {loc, msg}.
    if let Some(detail) = body.get("detail") {
        if let Some(text) = detail.as_str() {
            return format!("Validation Error: {text}");
        }

        if let Some(entries) = detail.as_array() {
            let lines = detail_lines(entries);
            if !lines.is_empty() {
                return bulleted("Validation Error:", &lines);
            }
        }
    }

    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return format!("Validation Error: {message}");
    }

    // Rails-style shape: "errors" as field → message(s).
    if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        let mut lines = Vec::new();
        for (field, messages) in errors {
            match messages.as_array() {
                Some(items) => {
                    for item in items {
                        lines.push(format!("{field}: {}", display_value(item)));
                    }
                }
                None => lines.push(format!("{field}: {}", display_value(messages))),
            }
        }
        if !lines.is_empty() {
            return bulleted("Validation Error:", &lines);
        }
    }

    format!("Validation Error: {body}")
}

/// Extract field-specific errors for programmatic access.
///
/// Mirrors the two recognized shapes; anything else yields an empty map.
pub fn extract_field_errors(body: &Value) -> BTreeMap<String, String> {
    let mut field_errors = BTreeMap::new();

    if let Some(entries) = body.get("detail").and_then(Value::as_array) {
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            let field = entry
                .get("loc")
                .and_then(Value::as_array)
                .map(|loc| join_location(loc))
                .filter(|joined| !joined.is_empty())
                .unwrap_or_else(|| "unknown".to_string());
            let msg = entry
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("Invalid value");
            field_errors.insert(field, msg.to_string());
        }
    } else if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        for (field, messages) in errors {
            let joined = match messages.as_array() {
                Some(items) => items
                    .iter()
                    .map(display_value)
                    .collect::<Vec<_>>()
                    .join("; "),
                None => display_value(messages),
            };
            field_errors.insert(field.clone(), joined);
        }
    }

    field_errors
}

fn detail_lines(entries: &[Value]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let field = entry
            .get("loc")
            .and_then(Value::as_array)
            .map(|loc| join_location(loc))
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| "unknown field".to_string());
        let msg = entry
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("Invalid value");
        lines.push(format!("{field}: {msg}"));
    }
    lines
}

fn join_location(loc: &[Value]) -> String {
    loc.iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn bulleted(header: &str, lines: &[String]) -> String {
    let body = lines
        .iter()
        .map(|line| format!("  \u{2022} {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}\n{body}")
}

/// Render a JSON value the way a user would write it: strings unquoted,
/// everything else in its JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_string_is_used_directly() {
        let body = json!({"detail": "fqdn already taken"});
        assert_eq!(
            format_validation_message(&body),
            "Validation Error: fqdn already taken"
        );
        assert!(extract_field_errors(&body).is_empty());
    }

    #[test]
    fn detail_list_produces_bulleted_lines() {
        let body = json!({"detail": [{"loc": ["body", "field"], "msg": "invalid"}]});
        let message = format_validation_message(&body);
        assert!(message.contains("field"));
        assert!(message.contains("invalid"));
        assert!(message.starts_with("Validation Error:\n"));

        let fields = extract_field_errors(&body);
        assert_eq!(fields.get("body -> field").map(String::as_str), Some("invalid"));
    }

    #[test]
    fn missing_loc_falls_back_to_unknown() {
        let body = json!({"detail": [{"msg": "required"}]});
        assert!(format_validation_message(&body).contains("unknown field: required"));
        let fields = extract_field_errors(&body);
        assert_eq!(fields.get("unknown").map(String::as_str), Some("required"));
    }

    #[test]
    fn errors_map_joins_lists_with_semicolons() {
        let body = json!({"errors": {"fqdn": ["too short", "invalid tld"], "team_id": "required"}});
        let message = format_validation_message(&body);
        assert!(message.contains("fqdn: too short"));
        assert!(message.contains("team_id: required"));

        let fields = extract_field_errors(&body);
        assert_eq!(
            fields.get("fqdn").map(String::as_str),
            Some("too short; invalid tld")
        );
        assert_eq!(fields.get("team_id").map(String::as_str), Some("required"));
    }

    #[test]
    fn message_field_is_third_in_precedence() {
        let body = json!({"message": "nope"});
        assert_eq!(format_validation_message(&body), "Validation Error: nope");
    }

    #[test]
    fn unrecognized_shapes_never_fail() {
        let body = json!({"detail": {"weird": true}});
        assert!(format_validation_message(&body).starts_with("Validation Error: "));
        assert!(extract_field_errors(&body).is_empty());

        let body = json!([1, 2, 3]);
        assert!(format_validation_message(&body).starts_with("Validation Error: "));
        assert!(extract_field_errors(&body).is_empty());
    }

    #[test]
    fn detail_list_of_non_objects_falls_through() {
        let body = json!({"detail": ["oops"], "message": "fallback"});
        assert_eq!(format_validation_message(&body), "Validation Error: fallback");
    }
}
