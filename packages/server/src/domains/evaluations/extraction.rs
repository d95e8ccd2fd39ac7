//! Recover a JSON value from raw model output.
//!
//! Models answer with clean JSON, JSON wrapped in prose or markdown fences,
//! or nothing usable at all. Extraction never fails: when no JSON can be
//! recovered `parsed` is `None` and the raw text is still carried along.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Raw model output plus the JSON recovered from it, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResponse {
    pub raw: String,
    pub parsed: Option<Value>,
}

impl EvaluationResponse {
    /// Run extraction over raw model text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let raw = text.into();
        let parsed = extract_json(&raw);
        Self { raw, parsed }
    }

    /// Accept an evaluation as posted by a client.
    ///
    /// The payload may be the raw model text, a `{ raw | text, parsed }`
    /// wrapper produced by an earlier `/evaluate` call, or the already
    /// parsed evaluation object.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Null => Self::from_text(""),
            Value::String(text) => Self::from_text(text),
            Value::Object(mut object) if object.contains_key("parsed") => {
                let raw = match object.remove("raw") {
                    Some(Value::String(raw)) => Some(raw),
                    _ => match object.remove("text") {
                        Some(Value::String(text)) => Some(text),
                        _ => None,
                    },
                };

                match object.remove("parsed") {
                    Some(Value::Null) | None => Self::from_text(raw.unwrap_or_default()),
                    Some(parsed) => Self {
                        raw: raw.unwrap_or_else(|| parsed.to_string()),
                        parsed: Some(parsed),
                    },
                }
            }
            other => Self {
                raw: other.to_string(),
                parsed: Some(other),
            },
        }
    }

    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }
}

/// Best-effort JSON recovery, first success wins:
///
/// 1. the whole text parsed as JSON
/// 2. the span from the first `{` to the last `}`
///
/// Stray braces outside the real payload defeat step 2. Valid JSON nested
/// deeper than serde_json's recursion limit (128) is not recovered either.
pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(value) => {
            debug!(
                offset = start,
                length = end + 1 - start,
                "Recovered JSON object from surrounding text"
            );
            Some(value)
        }
        Err(e) => {
            debug!(error = %e, text_length = text.len(), "No JSON recoverable from model output");
            None
        }
    }
}
