//! Persist an already-produced evaluation.

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::domains::evaluations::normalize::{
    normalize_ability, normalize_accuracy, normalize_project,
};
use crate::domains::evaluations::shaping::{
    shape_concept_record, shape_project_record, SubmissionContext,
};
use crate::domains::evaluations::{EvaluationError, EvaluationKind, EvaluationResponse};
use crate::kernel::BaseEvaluationStore;

#[derive(Debug, Clone)]
pub struct StoreEvaluationInput {
    pub email: String,
    pub project_name: String,
    pub page_name: Option<String>,
    pub video_url: String,
    pub kind: EvaluationKind,
    /// Raw model text, a bare parsed object, or `{raw, parsed}`.
    pub evaluation: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEvaluation {
    pub id: Uuid,
    pub kind: EvaluationKind,
}

fn required(value: &str, field: &str) -> Result<String, EvaluationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EvaluationError::missing(field));
    }
    Ok(trimmed.to_string())
}

pub async fn store_evaluation(
    input: StoreEvaluationInput,
    store: &dyn BaseEvaluationStore,
) -> Result<StoredEvaluation, EvaluationError> {
    let context = SubmissionContext {
        email: required(&input.email, "email")?,
        project_name: required(&input.project_name, "projectName")?,
        page_name: input
            .page_name
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        video_url: required(&input.video_url, "videoUrl")?,
    };
    if input.evaluation.is_null() {
        return Err(EvaluationError::missing("evaluation"));
    }

    let response = EvaluationResponse::from_payload(input.evaluation);
    let parsed = response.parsed();

    let id = match input.kind {
        EvaluationKind::Concept => {
            let record = shape_concept_record(
                context,
                &normalize_accuracy(parsed),
                &normalize_ability(parsed),
            );
            store
                .save_concept_evaluation(record)
                .await
                .map_err(EvaluationError::Persistence)?
                .into_uuid()
        }
        EvaluationKind::Project => {
            let record = shape_project_record(context, &normalize_project(parsed), parsed);
            store
                .save_project_evaluation(record)
                .await
                .map_err(EvaluationError::Persistence)?
                .into_uuid()
        }
    };

    info!(%id, kind = %input.kind, "Evaluation stored");

    Ok(StoredEvaluation {
        id,
        kind: input.kind,
    })
}
