use serde_json::Value;

use crate::utils::text::coerce_flag;

/// Outcome of decoding a stored `flags` column.
///
/// Stored data predates any validation, so decoding never fails: text that
/// is not a JSON string or list is kept verbatim as a single flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFlags {
    /// Column was NULL or empty.
    Empty,
    /// Column held a JSON list (elements coerced to strings) or a JSON string.
    Decoded(Vec<String>),
    /// Column was not usable JSON; the raw text becomes the only flag.
    Fallback(String),
}

impl ParsedFlags {
    pub fn into_flags(self) -> Vec<String> {
        match self {
            ParsedFlags::Empty => Vec::new(),
            ParsedFlags::Decoded(flags) => flags,
            ParsedFlags::Fallback(raw) => vec![raw],
        }
    }
}

pub fn decode_flags(raw: Option<&str>) -> ParsedFlags {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return ParsedFlags::Empty,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(flag)) => ParsedFlags::Decoded(vec![flag]),
        Ok(Value::Array(items)) => ParsedFlags::Decoded(items.iter().map(coerce_flag).collect()),
        Ok(other) => {
            tracing::debug!("Stored flags decoded to non-list value {}, keeping raw text", other);
            ParsedFlags::Fallback(raw.to_string())
        }
        Err(e) => {
            tracing::debug!("Stored flags are not JSON ({}), keeping raw text", e);
            ParsedFlags::Fallback(raw.to_string())
        }
    }
}

/// Best-effort flag list for a stored column value.
pub fn parse_flags(raw: Option<&str>) -> Vec<String> {
    decode_flags(raw).into_flags()
}

/// Storage form of a flag list.
pub fn serialize_flags(flags: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    serde_json::to_string(flags).unwrap_or_else(|_| "[]".to_string())
}
