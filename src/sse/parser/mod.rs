//! SSE line parsing logic
//!
//! Pure functions that classify one line of the event stream and turn a
//! `data:` payload into a decoded event.

use crate::sse::events::{DecodeResult, DecodedEvent, MalformedEventError, SseLine};

/// Field name carrying event payloads.
pub const DATA_FIELD: &str = "data";

/// Parse a single SSE line (terminator already removed) into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    parse_sse_line_with(line, DATA_FIELD)
}

/// Parse a single SSE line, treating `field` as the payload-carrying field.
///
/// Everything after `field:` is the value, minus at most one leading space.
/// No other trimming happens, so payload comparisons stay exact. The space is
/// optional, so `data:[DONE]` terminates just like `data: [DONE]`; backends
/// that only ever send `data: ` are unaffected.
///
/// A line without a colon never carries a payload, even when it is exactly
/// the field name; it is reported as a field with an empty value.
pub fn parse_sse_line_with(line: &str, field: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    let Some((name, rest)) = line.split_once(':') else {
        return SseLine::Field {
            name: line.to_string(),
            value: String::new(),
        };
    };
    let value = rest.strip_prefix(' ').unwrap_or(rest);

    if name == field {
        SseLine::Data(value.to_string())
    } else {
        SseLine::Field {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse a frame payload as JSON.
pub fn parse_payload(payload: &str) -> DecodeResult {
    serde_json::from_str::<serde_json::Value>(payload)
        .map(DecodedEvent::new)
        .map_err(|e| MalformedEventError::new(payload, e.to_string()))
}
