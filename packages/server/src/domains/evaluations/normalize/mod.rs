//! Evaluation normalizer.
//!
//! Classifies a parsed model answer into one of the known shapes and pulls
//! out typed fields. Every entry point returns a value; unrecognised or
//! malformed input degrades to empty fields and is logged, never raised.

pub mod ability;
pub mod accuracy;
pub mod project;
pub mod score;

pub use ability::{normalize_ability, AbilityShape, NormalizedAbility};
pub use accuracy::{normalize_accuracy, AccuracyShape, NormalizedAccuracy};
pub use project::{normalize_project, ProjectEvaluation, ProjectParameter};
pub use score::{clamp_legacy_score, extract_percentage_score};

use serde::Serialize;
use serde_json::{Map, Value};

/// Which shape a payload was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Structured,
    LegacyCriteria,
    LegacyOverall,
    LegacyText,
    None,
}

/// What to pull out of a parsed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationTarget {
    Accuracy,
    Ability,
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Normalized {
    Accuracy(NormalizedAccuracy),
    Ability(NormalizedAbility),
    Project(ProjectEvaluation),
}

pub fn normalize(target: NormalizationTarget, parsed: Option<&Value>) -> Normalized {
    match target {
        NormalizationTarget::Accuracy => Normalized::Accuracy(normalize_accuracy(parsed)),
        NormalizationTarget::Ability => Normalized::Ability(normalize_ability(parsed)),
        NormalizationTarget::Project => Normalized::Project(normalize_project(parsed)),
    }
}

/// First element of `object[key]` when it is a non-empty array.
fn first_element<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).and_then(Value::as_array).and_then(|items| items.first())
}
