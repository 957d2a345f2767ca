//! Helpers for reading loosely-typed attribute values.
//!
//! Attribute values come from an editor and are stored as JSON, so numbers may
//! arrive as strings (`"5px"`), toggles as `"on"`/`"off"`, and lists as arrays.
//! Every helper here is total: malformed input degrades to `None` or zero.

use std::borrow::Cow;

use serde_json::Value;

/// Toggle value meaning "enabled".
pub const ON: &str = "on";
/// Toggle value meaning "disabled".
pub const OFF: &str = "off";

/// Stand-in for a missing sub-object.
pub static NULL: Value = Value::Null;

/// Scalar value as text. Numbers are formatted, booleans map to `on`/`off`.
#[must_use]
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(true) => Some(Cow::Borrowed(ON)),
        Value::Bool(false) => Some(Cow::Borrowed(OFF)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scalar value as text, treating the empty string as absent.
#[must_use]
pub fn non_empty_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    value
        .and_then(as_text)
        .filter(|s| !s.trim().is_empty())
}

/// `true` when a toggle value is `on`.
#[must_use]
pub fn is_on(value: Option<&Value>) -> bool {
    value.and_then(as_text).is_some_and(|s| s == ON)
}

/// String items of an array value; a lone string is treated as a one-item list.
#[must_use]
pub fn string_list(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) if !s.is_empty() => s.split(',').map(str::trim).collect(),
        _ => Vec::new(),
    }
}

/// `true` when the value refers to something only known at render time:
/// a CSS custom property, a `calc()`-style expression, or a dynamic
/// content token. Such values cannot be compared numerically.
#[must_use]
pub fn is_global_token(raw: &str) -> bool {
    let raw = raw.trim();
    raw.contains("var(")
        || raw.starts_with("$variable(")
        || raw.starts_with("calc(")
        || raw.starts_with("min(")
        || raw.starts_with("max(")
        || raw.starts_with("clamp(")
}

/// Best-effort leading number extraction: `"5px"` → `5.0`, `" -1.5em"` → `-1.5`.
///
/// Returns `None` when no digits lead the string.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    raw[..end].parse().ok()
}

/// Numeric value of an attribute, zero when it cannot be parsed.
#[must_use]
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// `true` unless the length is a literal zero (or unparsable, which counts as zero).
///
/// Global tokens are conservatively treated as non-zero.
#[must_use]
pub fn is_nonzero_length(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) if is_global_token(s) => true,
        other => number_or_zero(other).abs() > f64::EPSILON,
    }
}

/// Convert a scale value to a decimal factor: `"120%"` → `1.2`, `"1.5"` → `1.5`.
#[must_use]
pub fn scale_factor(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = parse_number(raw)?;
    Some(if raw.ends_with('%') {
        number / 100.0
    } else {
        number
    })
}

/// Format a float the way CSS expects: no trailing zeros, no exponent.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let text = format!("{rounded:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

/// Editor keywords use underscores for spaces (`top_left`); CSS wants spaces.
#[must_use]
pub fn keyword(raw: &str) -> String {
    raw.trim().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number_best_effort() {
        assert_eq!(parse_number("5px"), Some(5.0));
        assert_eq!(parse_number(" -1.5em"), Some(-1.5));
        assert_eq!(parse_number("+.5"), Some(0.5));
        assert_eq!(parse_number("px"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_nonzero_length() {
        assert!(!is_nonzero_length(Some(&json!("0px"))));
        assert!(!is_nonzero_length(Some(&json!("abc"))));
        assert!(!is_nonzero_length(None));
        assert!(is_nonzero_length(Some(&json!("5px"))));
        assert!(is_nonzero_length(Some(&json!(3))));
        assert!(is_nonzero_length(Some(&json!("var(--radius)"))));
        assert!(is_nonzero_length(Some(&json!("$variable({\"type\":\"content\"})$"))));
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor("120%"), Some(1.2));
        assert_eq!(scale_factor("0.5"), Some(0.5));
        assert_eq!(scale_factor("big"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.2), "1.2");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(33.333_333), "33.3333");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_as_text_and_lists() {
        assert_eq!(as_text(&json!(2)).as_deref(), Some("2"));
        assert_eq!(as_text(&json!(true)).as_deref(), Some("on"));
        assert!(as_text(&json!({})).is_none());
        assert_eq!(string_list(Some(&json!(["rotate", 1, "invert"]))), vec!["rotate", "invert"]);
        assert_eq!(string_list(Some(&json!("italic, uppercase"))), vec!["italic", "uppercase"]);
        assert!(non_empty_text(Some(&json!("  "))).is_none());
    }
}
