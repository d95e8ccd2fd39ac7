//! Accuracy score and feedback.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::score::{clamp_legacy_score, extract_percentage_score, number_value};
use super::{first_element, ShapeKind};
use crate::domains::evaluations::models::Feedback;

const ACCURACY_LEVEL_KEY: &str = "Accuracy Level";
const FEEDBACK_KEY: &str = "Feedback";

/// Fields concatenated from a legacy `content_evaluation` block.
const CONTENT_EVALUATION_FIELDS: &[&str] =
    &["accuracy", "completeness", "clarity", "depth", "engagement"];

/// Fields concatenated from a legacy `video_evaluation` block.
const VIDEO_EVALUATION_FIELDS: &[&str] = &["relevance", "coverage", "clarity", "engagement"];

/// Explicit score fields in a legacy text block, first present wins.
const LEGACY_TEXT_SCORE_FIELDS: &[&str] = &["overall_score", "score", "accuracy_score"];

lazy_static! {
    static ref FENCED_JSON: Regex =
        Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("valid fenced json regex");
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAccuracy {
    /// 0-100 for the structured schema, 1-10 for legacy criteria.
    pub score: Option<f64>,
    pub feedback: Feedback,
}

impl Default for NormalizedAccuracy {
    fn default() -> Self {
        Self {
            score: None,
            feedback: Feedback::default(),
        }
    }
}

/// The accuracy-bearing shape found in a parsed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum AccuracyShape<'a> {
    /// First element of a non-empty `"Accuracy Level"` array.
    Structured(&'a Value),
    /// First element of a non-empty `criteria` array.
    LegacyCriteria(&'a Value),
    /// Object carrying `overallScore`.
    LegacyOverall(&'a Map<String, Value>),
    /// Body of a ```` ```json ```` block found in a `text` field.
    LegacyText(&'a str),
    None,
}

impl<'a> AccuracyShape<'a> {
    pub fn classify(parsed: Option<&'a Value>) -> Self {
        let Some(object) = parsed.and_then(Value::as_object) else {
            return AccuracyShape::None;
        };

        if let Some(entry) = first_element(object, ACCURACY_LEVEL_KEY) {
            return AccuracyShape::Structured(entry);
        }
        if let Some(criterion) = first_element(object, "criteria") {
            return AccuracyShape::LegacyCriteria(criterion);
        }
        if object.contains_key("overallScore") {
            return AccuracyShape::LegacyOverall(object);
        }
        if let Some(Value::String(text)) = object.get("text") {
            if let Some(captures) = FENCED_JSON.captures(text) {
                if let Some(body) = captures.get(1) {
                    return AccuracyShape::LegacyText(body.as_str());
                }
            }
        }
        AccuracyShape::None
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            AccuracyShape::Structured(_) => ShapeKind::Structured,
            AccuracyShape::LegacyCriteria(_) => ShapeKind::LegacyCriteria,
            AccuracyShape::LegacyOverall(_) => ShapeKind::LegacyOverall,
            AccuracyShape::LegacyText(_) => ShapeKind::LegacyText,
            AccuracyShape::None => ShapeKind::None,
        }
    }

    pub fn normalize(&self) -> NormalizedAccuracy {
        match self {
            AccuracyShape::Structured(entry) => structured(entry),
            AccuracyShape::LegacyCriteria(criterion) => NormalizedAccuracy {
                score: Some(clamp_legacy_score(criterion.get("score"))),
                feedback: Feedback::from_value(criterion.get("feedback")),
            },
            AccuracyShape::LegacyOverall(object) => NormalizedAccuracy {
                score: Some(clamp_legacy_score(object.get("overallScore"))),
                feedback: Feedback::from_value(object.get("overallFeedback")),
            },
            AccuracyShape::LegacyText(body) => legacy_text(body),
            AccuracyShape::None => NormalizedAccuracy::default(),
        }
    }
}

/// Normalize the accuracy part of a parsed evaluation. Never fails.
pub fn normalize_accuracy(parsed: Option<&Value>) -> NormalizedAccuracy {
    let shape = AccuracyShape::classify(parsed);
    debug!(shape = ?shape.kind(), "Classified accuracy shape");
    shape.normalize()
}

fn structured(entry: &Value) -> NormalizedAccuracy {
    let score = match entry.get(ACCURACY_LEVEL_KEY) {
        Some(Value::String(level)) => extract_percentage_score(level),
        None | Some(Value::Null) => None,
        Some(other) => {
            warn!(value = %other, "Accuracy level is not a string; score left empty");
            None
        }
    };

    NormalizedAccuracy {
        score,
        feedback: Feedback::from_value(entry.get(FEEDBACK_KEY)),
    }
}

fn legacy_text(body: &str) -> NormalizedAccuracy {
    let inner: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Fenced JSON in legacy text did not parse");
            return NormalizedAccuracy::default();
        }
    };

    let (section, fields) = if let Some(section) = inner.get("content_evaluation") {
        (section, CONTENT_EVALUATION_FIELDS)
    } else if let Some(section) = inner.get("video_evaluation") {
        (section, VIDEO_EVALUATION_FIELDS)
    } else {
        warn!("Legacy text block has no content_evaluation or video_evaluation");
        return NormalizedAccuracy::default();
    };

    let Some(section) = section.as_object() else {
        warn!("Legacy evaluation section is not an object");
        return NormalizedAccuracy::default();
    };

    let feedback = fields
        .iter()
        .filter_map(|field| section.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let score = LEGACY_TEXT_SCORE_FIELDS
        .iter()
        .find_map(|field| number_value(section.get(*field)).or_else(|| number_value(inner.get(*field))));

    NormalizedAccuracy {
        score,
        feedback: Feedback::Text(feedback),
    }
}
