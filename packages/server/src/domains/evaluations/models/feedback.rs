//! Feedback shapes returned by the model.
//!
//! Internally feedback uses named fields. The punctuated prompt keys
//! (`"What could you do well?"` etc.) only appear here, where values are
//! decoded from and encoded back to JSON.

use serde::Serialize;
use serde_json::{Map, Value};

pub const STRENGTHS_KEY: &str = "What could you do well?";
pub const IMPROVEMENTS_KEY: &str = "What can you do better?";
pub const NEXT_STEPS_KEY: &str = "Next Suggested Deep Dive?";

const GOOD_KEY: &str = "good";
const BAD_KEY: &str = "bad";
const UGLY_KEY: &str = "ugly";

/// The three prompted feedback answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredFeedback {
    #[serde(rename = "What could you do well?")]
    pub strengths: String,
    #[serde(rename = "What can you do better?")]
    pub improvements: String,
    #[serde(rename = "Next Suggested Deep Dive?")]
    pub next_steps: String,
}

impl StructuredFeedback {
    /// Decode from an object carrying at least one of the prompted keys.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let has_any = [STRENGTHS_KEY, IMPROVEMENTS_KEY, NEXT_STEPS_KEY]
            .iter()
            .any(|key| object.contains_key(*key));
        if !has_any {
            return None;
        }

        Some(Self {
            strengths: text_field(object, STRENGTHS_KEY),
            improvements: text_field(object, IMPROVEMENTS_KEY),
            next_steps: text_field(object, NEXT_STEPS_KEY),
        })
    }

    /// JSON text using the prompted keys, as stored in feedback columns.
    pub fn to_json_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Older `good / bad / ugly` feedback shape used by project parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyFeedback {
    pub good: String,
    pub bad: String,
    pub ugly: String,
}

impl LegacyFeedback {
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let has_any = [GOOD_KEY, BAD_KEY, UGLY_KEY]
            .iter()
            .any(|key| object.contains_key(*key));
        if !has_any {
            return None;
        }

        Some(Self {
            good: text_field(object, GOOD_KEY),
            bad: text_field(object, BAD_KEY),
            ugly: text_field(object, UGLY_KEY),
        })
    }
}

/// Feedback attached to an accuracy or ability result.
///
/// Legacy payloads carry a bare string, which is kept as-is and never
/// coerced into the three-field shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Feedback {
    Structured(StructuredFeedback),
    Text(String),
}

impl Default for Feedback {
    fn default() -> Self {
        Feedback::Text(String::new())
    }
}

impl Feedback {
    /// Classify a raw feedback value.
    ///
    /// Objects with the prompted keys become `Structured`; any other object
    /// or array is kept as its JSON text so nothing recoverable is dropped.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Feedback::default(),
            Some(Value::String(text)) => Feedback::Text(text.clone()),
            Some(Value::Object(object)) => StructuredFeedback::from_object(object)
                .map(Feedback::Structured)
                .unwrap_or_else(|| Feedback::Text(Value::Object(object.clone()).to_string())),
            Some(other) => Feedback::Text(other.to_string()),
        }
    }

    /// Text for a feedback column: JSON for structured feedback, the string
    /// itself otherwise.
    pub fn to_storage_text(&self) -> String {
        match self {
            Feedback::Structured(feedback) => feedback.to_json_text(),
            Feedback::Text(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Feedback::Text(text) if text.is_empty())
    }
}

/// Feedback on a single project parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterFeedback {
    Structured(StructuredFeedback),
    Legacy(LegacyFeedback),
    Text(String),
    Missing,
}

impl ParameterFeedback {
    /// Pick the shape from the keys present. Prompted keys win over
    /// `good/bad/ugly` when both appear.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(object)) => StructuredFeedback::from_object(object)
                .map(ParameterFeedback::Structured)
                .or_else(|| LegacyFeedback::from_object(object).map(ParameterFeedback::Legacy))
                .unwrap_or(ParameterFeedback::Missing),
            Some(Value::String(text)) if !text.is_empty() => ParameterFeedback::Text(text.clone()),
            _ => ParameterFeedback::Missing,
        }
    }

    /// Marked-up lines for the flat feedback column. Empty answers are skipped.
    pub fn render_lines(&self) -> Vec<String> {
        let labelled: Vec<(&str, &str, &str)> = match self {
            ParameterFeedback::Structured(feedback) => vec![
                ("✓", STRENGTHS_KEY, feedback.strengths.as_str()),
                ("✗", IMPROVEMENTS_KEY, feedback.improvements.as_str()),
                ("⚠", NEXT_STEPS_KEY, feedback.next_steps.as_str()),
            ],
            ParameterFeedback::Legacy(feedback) => vec![
                ("✓", "Good", feedback.good.as_str()),
                ("✗", "Bad", feedback.bad.as_str()),
                ("⚠", "Improvements", feedback.ugly.as_str()),
            ],
            ParameterFeedback::Text(text) => return vec![text.clone()],
            ParameterFeedback::Missing => return Vec::new(),
        };

        labelled
            .into_iter()
            .filter(|(_, _, text)| !text.trim().is_empty())
            .map(|(mark, label, text)| format!("{} {}: {}", mark, label, text))
            .collect()
    }
}

/// String value of `key`; non-string scalars are stringified, null and
/// missing become empty.
pub(crate) fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
