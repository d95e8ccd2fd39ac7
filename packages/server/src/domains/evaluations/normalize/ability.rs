//! Ability-to-explain level and feedback.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{first_element, ShapeKind};
use crate::domains::evaluations::models::feedback::text_field;
use crate::domains::evaluations::models::Feedback;

const ABILITY_KEY: &str = "Ability to explain";
const STRUCTURED_FEEDBACK_KEY: &str = "Structured Feedback";
const FEEDBACK_KEY: &str = "Feedback";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedAbility {
    /// Free-form label such as "Advanced" or "Expert (Feynman Level)".
    pub level: String,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbilityShape<'a> {
    /// First element of a non-empty `"Ability to explain"` array.
    Structured(&'a Value),
    /// First element of a non-empty `criteria` array.
    LegacyCriteria(&'a Value),
    /// Object carrying `level` and/or `overallFeedback`.
    LegacyOverall(&'a Map<String, Value>),
    None,
}

impl<'a> AbilityShape<'a> {
    pub fn classify(parsed: Option<&'a Value>) -> Self {
        let Some(object) = parsed.and_then(Value::as_object) else {
            return AbilityShape::None;
        };

        if let Some(entry) = first_element(object, ABILITY_KEY) {
            return AbilityShape::Structured(entry);
        }
        if let Some(criterion) = first_element(object, "criteria") {
            return AbilityShape::LegacyCriteria(criterion);
        }
        if object.contains_key("level") || object.contains_key("overallFeedback") {
            return AbilityShape::LegacyOverall(object);
        }
        AbilityShape::None
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            AbilityShape::Structured(_) => ShapeKind::Structured,
            AbilityShape::LegacyCriteria(_) => ShapeKind::LegacyCriteria,
            AbilityShape::LegacyOverall(_) => ShapeKind::LegacyOverall,
            AbilityShape::None => ShapeKind::None,
        }
    }

    pub fn normalize(&self) -> NormalizedAbility {
        match self {
            AbilityShape::Structured(entry) => {
                let level = match entry.get(ABILITY_KEY) {
                    Some(Value::String(level)) => level.clone(),
                    None | Some(Value::Null) => String::new(),
                    Some(other) => {
                        warn!(value = %other, "Ability level is not a string; level left empty");
                        String::new()
                    }
                };
                let feedback = entry
                    .get(STRUCTURED_FEEDBACK_KEY)
                    .filter(|v| !v.is_null())
                    .or_else(|| entry.get(FEEDBACK_KEY));

                NormalizedAbility {
                    level,
                    feedback: Feedback::from_value(feedback),
                }
            }
            AbilityShape::LegacyCriteria(criterion) => NormalizedAbility {
                level: criterion
                    .as_object()
                    .map(|c| text_field(c, "name"))
                    .unwrap_or_default(),
                feedback: Feedback::from_value(criterion.get("feedback")),
            },
            AbilityShape::LegacyOverall(object) => NormalizedAbility {
                level: text_field(object, "level"),
                feedback: Feedback::from_value(object.get("overallFeedback")),
            },
            AbilityShape::None => NormalizedAbility::default(),
        }
    }
}

/// Normalize the ability part of a parsed evaluation. Never fails.
pub fn normalize_ability(parsed: Option<&Value>) -> NormalizedAbility {
    let shape = AbilityShape::classify(parsed);
    debug!(shape = ?shape.kind(), "Classified ability shape");
    shape.normalize()
}
