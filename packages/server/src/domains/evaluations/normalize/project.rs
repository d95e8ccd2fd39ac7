//! Weighted project parameters.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::score::number_value;
use super::ShapeKind;
use crate::domains::evaluations::models::feedback::text_field;
use crate::domains::evaluations::models::{Feedback, ParameterFeedback};

/// One rubric parameter of a project evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectParameter {
    pub name: String,
    /// Share of the overall grade, 0-100.
    pub weightage: f64,
    pub level: String,
    pub feedback: ParameterFeedback,
}

impl ProjectParameter {
    fn from_value(value: &Value) -> Option<Self> {
        let Some(object) = value.as_object() else {
            warn!(value = %value, "Skipping project parameter that is not an object");
            return None;
        };

        Some(Self {
            name: text_field(object, "name"),
            weightage: number_value(object.get("weightage")).unwrap_or(0.0),
            level: text_field(object, "level"),
            feedback: ParameterFeedback::from_value(object.get("feedback")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProjectEvaluation {
    Parameters {
        parameters: Vec<ProjectParameter>,
    },
    Overall {
        #[serde(rename = "overallScore")]
        overall_score: Option<f64>,
        #[serde(rename = "overallFeedback")]
        overall_feedback: Feedback,
    },
    None,
}

impl ProjectEvaluation {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ProjectEvaluation::Parameters { .. } => ShapeKind::Structured,
            ProjectEvaluation::Overall { .. } => ShapeKind::LegacyOverall,
            ProjectEvaluation::None => ShapeKind::None,
        }
    }
}

/// Normalize a project evaluation. Never fails.
///
/// A `parameters` array is the evaluation; otherwise the generic
/// `overallScore` / `overallFeedback` pair is used.
pub fn normalize_project(parsed: Option<&Value>) -> ProjectEvaluation {
    let Some(object) = parsed.and_then(Value::as_object) else {
        return ProjectEvaluation::None;
    };

    let evaluation = match object.get("parameters") {
        Some(Value::Array(items)) => ProjectEvaluation::Parameters {
            parameters: items.iter().filter_map(ProjectParameter::from_value).collect(),
        },
        other => {
            if let Some(other) = other {
                warn!(value = %other, "Project parameters is not an array");
            }
            if object.contains_key("overallScore") || object.contains_key("overallFeedback") {
                ProjectEvaluation::Overall {
                    overall_score: number_value(object.get("overallScore")),
                    overall_feedback: Feedback::from_value(object.get("overallFeedback")),
                }
            } else {
                ProjectEvaluation::None
            }
        }
    };

    debug!(shape = ?evaluation.kind(), "Classified project shape");
    evaluation
}
