//! JSON decoding for Bot API payloads.
//!
//! The Bot API adds fields over time, so the bot normally decodes in
//! [`UnknownFields::Ignore`] mode. [`UnknownFields::Reject`] exists for
//! fixtures and tests that must notice schema drift.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// What to do with keys the target type does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Drop them, logging their paths at `debug`.
    #[default]
    Ignore,
    /// Fail with [`TgError::UnknownFields`].
    Reject,
}

#[derive(Debug, thiserror::Error)]
pub enum TgError {
    #[error("Invalid Telegram payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown fields in Telegram payload: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
}

/// Decode `body` into `T` under the given unknown-field policy.
pub fn decode<T>(body: &str, mode: UnknownFields) -> Result<T, TgError>
where
    T: DeserializeOwned + Serialize,
{
    let raw: Value = serde_json::from_str(body)?;
    let decoded: T = serde_json::from_value(raw.clone())?;

    // Every declared field is re-emitted (options as null), so any key in
    // the input missing from the re-encoded value was dropped by serde.
    let known = serde_json::to_value(&decoded)?;
    let mut unknown = Vec::new();
    collect_unknown(&raw, &known, "", &mut unknown);

    if unknown.is_empty() {
        return Ok(decoded);
    }
    match mode {
        UnknownFields::Ignore => {
            tracing::debug!(fields = ?unknown, "Ignoring unknown Telegram fields");
            Ok(decoded)
        }
        UnknownFields::Reject => Err(TgError::UnknownFields(unknown)),
    }
}

/// Decode `body`, ignoring unknown fields.
pub fn decode_lenient<T>(body: &str) -> Result<T, TgError>
where
    T: DeserializeOwned + Serialize,
{
    decode(body, UnknownFields::Ignore)
}

fn collect_unknown(raw: &Value, known: &Value, path: &str, out: &mut Vec<String>) {
    match (raw, known) {
        (Value::Object(raw), Value::Object(known)) => collect_object(raw, known, path, out),
        (Value::Array(raw), Value::Array(known)) => {
            for (i, (r, k)) in raw.iter().zip(known).enumerate() {
                collect_unknown(r, k, &format!("{path}[{i}]"), out);
            }
        }
        _ => {}
    }
}

fn collect_object(
    raw: &Map<String, Value>,
    known: &Map<String, Value>,
    path: &str,
    out: &mut Vec<String>,
) {
    for (key, value) in raw {
        let child = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        match known.get(key) {
            Some(known_value) => collect_unknown(value, known_value, &child, out),
            None => out.push(child),
        }
    }
}
