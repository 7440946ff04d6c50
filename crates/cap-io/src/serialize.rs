use serde::Serialize;

/// Serialize as minified JSON (no whitespace).
pub fn to_minified_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize as pretty JSON (for debugging).
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
