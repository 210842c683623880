//! Ordered-candidate field resolution over loosely-structured JSON.
//!
//! The API spells the same field several ways across endpoints and seasons,
//! so every dashboard field resolves as "first non-empty of these
//! candidates", falling back to a literal `"N/A"` placeholder. The
//! placeholder is a display contract: views never see a null.

use serde_json::Value;

/// Placeholder for any field that stays unresolved after all candidates.
pub const NOT_AVAILABLE: &str = "N/A";

/// A value counts as present unless it is null or an empty string.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// First candidate that is present, untouched.
pub fn first_defined<'a>(candidates: &[&'a Value]) -> Option<&'a Value> {
    candidates.iter().copied().find(|value| is_present(value))
}

/// Display-text coercion: strings pass through, scalars stringify,
/// containers and null yield nothing.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// First candidate that resolves to display text.
pub fn resolve_text(candidates: &[&Value]) -> Option<String> {
    candidates.iter().find_map(|value| display_text(value))
}

/// First candidate that resolves to display text, else `"N/A"`.
pub fn resolve_or_na(candidates: &[&Value]) -> String {
    resolve_text(candidates).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Numeric coercion accepting both JSON numbers and numeric strings.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
