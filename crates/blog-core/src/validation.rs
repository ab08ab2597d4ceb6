//! Request validation - field presence, identifier coercion and title rules.
//!
//! Payloads arrive as loosely typed JSON objects. The helpers here turn them
//! into typed values or a [`DomainError`] describing what is wrong.

use serde_json::{Map, Value};

use crate::error::DomainError;

/// A decoded JSON request body.
pub type Payload = Map<String, Value>;

/// Fields every create and edit request must carry.
pub const POST_FIELDS: [&str; 3] = ["author_id", "title", "body"];

/// Decode a request body that must be valid JSON.
///
/// A JSON value that is not an object (including `null`) yields an empty
/// payload so the field checks report what is missing.
pub fn parse_payload(raw: &[u8]) -> Result<Payload, DomainError> {
    let value: Value = serde_json::from_slice(raw).map_err(|_| DomainError::MalformedBody)?;
    Ok(into_object(value))
}

/// Decode a request body, treating an absent or undecodable body as empty.
pub fn parse_payload_lenient(raw: &[u8]) -> Payload {
    serde_json::from_slice(raw)
        .map(into_object)
        .unwrap_or_default()
}

fn into_object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

/// Fail with every absent name, in the order requested.
pub fn require_fields(payload: &Payload, names: &[&str]) -> Result<(), DomainError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !payload.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::MissingFields(missing))
    }
}

/// Coerce any JSON scalar to an integer author id.
pub fn coerce_author_id(value: &Value) -> Result<i64, DomainError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err(DomainError::InvalidAuthorId)
            } else {
                n.as_f64()
                    .and_then(truncate_float)
                    .ok_or(DomainError::InvalidAuthorId)
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::InvalidAuthorId),
        _ => Err(DomainError::InvalidAuthorId),
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Render a JSON value as text. `null` becomes empty text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Trim a title and reject it when nothing is left.
pub fn normalize_title(raw: &str) -> Result<String, DomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Trim a body. Empty bodies are allowed.
pub fn normalize_body(raw: &str) -> String {
    raw.trim().to_string()
}

/// The typed contents of a create or edit request, before title rules apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSubmission {
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

impl PostSubmission {
    /// Check that all post fields are present and coerce them.
    pub fn from_payload(payload: &Payload) -> Result<Self, DomainError> {
        require_fields(payload, &POST_FIELDS)?;

        Ok(Self {
            author_id: coerce_author_id(&payload["author_id"])?,
            title: coerce_text(&payload["title"]),
            body: coerce_text(&payload["body"]),
        })
    }
}
