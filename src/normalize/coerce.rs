//! Defensive value coercion
//!
//! Every helper here takes an optional JSON value and never fails: missing,
//! null, and mistyped fields coalesce to a default. Numeric coercion follows
//! `Number(x) || 0` semantics: a string number parses, anything else is 0.

use serde_json::Value;

/// Coerce a value to a number; missing/non-numeric/NaN become 0.0
pub fn num(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => {
            let f = n.as_f64().unwrap_or(0.0);
            if f.is_finite() {
                f
            } else {
                0.0
            }
        }
        Some(Value::String(s)) => {
            let f = s.trim().parse::<f64>().unwrap_or(0.0);
            if f.is_finite() {
                f
            } else {
                0.0
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// Coerce a value to a string; non-strings become empty
pub fn string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Coerce a value to a string with a fallback for missing/empty
pub fn string_or(value: Option<&Value>, fallback: &str) -> String {
    let s = string(value);
    if s.is_empty() {
        fallback.to_string()
    } else {
        s
    }
}

/// Interpret a value as a truthy flag
///
/// Matches the historic batches, which stored the recharge flag variously as
/// a boolean and as the string `"true"` in mixed case.
pub fn truthy_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
