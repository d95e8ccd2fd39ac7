//! Flatten normalized evaluations into insertable records.
//!
//! Shaping only serializes. Empty or missing values coming out of the
//! normalizer pass through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize::{NormalizedAbility, NormalizedAccuracy, ProjectEvaluation};

/// Who and what an evaluation is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    pub email: String,
    pub project_name: String,
    pub page_name: Option<String>,
    pub video_url: String,
}

/// Insert shape for `concept_evaluations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConceptEvaluation {
    pub email: String,
    pub project_name: String,
    pub page_name: Option<String>,
    pub video_url: String,
    pub accuracy_score: Option<f64>,
    /// JSON text for structured feedback, the plain string otherwise.
    pub accuracy_feedback: String,
    pub ability_level: String,
    pub ability_feedback: String,
}

/// Insert shape for `project_evaluations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectEvaluation {
    pub email: String,
    pub project_name: String,
    pub video_url: String,
    pub evaluation_summary_text: String,
    pub evaluation_feedback_text: String,
    /// The full parsed model answer, `None` when nothing was parsed.
    pub evaluation_json: Option<String>,
}

pub fn shape_concept_record(
    context: SubmissionContext,
    accuracy: &NormalizedAccuracy,
    ability: &NormalizedAbility,
) -> NewConceptEvaluation {
    NewConceptEvaluation {
        email: context.email,
        project_name: context.project_name,
        page_name: context.page_name,
        video_url: context.video_url,
        accuracy_score: accuracy.score,
        accuracy_feedback: accuracy.feedback.to_storage_text(),
        ability_level: ability.level.clone(),
        ability_feedback: ability.feedback.to_storage_text(),
    }
}

/// `parsed` is stored verbatim as the evaluation JSON column.
pub fn shape_project_record(
    context: SubmissionContext,
    evaluation: &ProjectEvaluation,
    parsed: Option<&Value>,
) -> NewProjectEvaluation {
    NewProjectEvaluation {
        email: context.email,
        project_name: context.project_name,
        video_url: context.video_url,
        evaluation_summary_text: project_summary_text(evaluation),
        evaluation_feedback_text: project_feedback_text(evaluation),
        evaluation_json: parsed.map(Value::to_string),
    }
}

/// `"<name> (<weightage>%): <level>"` per parameter, joined by `"; "`.
pub fn project_summary_text(evaluation: &ProjectEvaluation) -> String {
    match evaluation {
        ProjectEvaluation::Parameters { parameters } => parameters
            .iter()
            .map(|p| format!("{} ({}%): {}", p.name, p.weightage, p.level))
            .collect::<Vec<_>>()
            .join("; "),
        ProjectEvaluation::Overall {
            overall_score: Some(score),
            ..
        } => format!("Overall Score: {}", score),
        ProjectEvaluation::Overall { .. } | ProjectEvaluation::None => String::new(),
    }
}

/// Per parameter, a `<name>:` heading followed by its marked-up feedback
/// lines; parameters are separated by a blank line.
pub fn project_feedback_text(evaluation: &ProjectEvaluation) -> String {
    match evaluation {
        ProjectEvaluation::Parameters { parameters } => parameters
            .iter()
            .map(|p| {
                let mut lines = vec![format!("{}:", p.name)];
                lines.extend(p.feedback.render_lines());
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        ProjectEvaluation::Overall {
            overall_feedback, ..
        } => overall_feedback.to_storage_text(),
        ProjectEvaluation::None => String::new(),
    }
}
