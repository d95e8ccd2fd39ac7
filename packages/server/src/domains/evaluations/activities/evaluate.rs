//! Evaluate a video: call the model, extract JSON, normalize.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domains::evaluations::normalize::{
    normalize_project, AbilityShape, AccuracyShape, NormalizedAbility, NormalizedAccuracy,
    ProjectEvaluation, ShapeKind,
};
use crate::domains::evaluations::{prompts, EvaluationError, EvaluationKind, EvaluationResponse};
use crate::kernel::{BaseVideoEvaluator, ModelProvider, VideoEvaluationRequest};

/// Validated input for one evaluation.
#[derive(Debug, Clone)]
pub struct EvaluateVideoInput {
    pub video_url: String,
    pub api_key: String,
    pub kind: EvaluationKind,
    pub provider: ModelProvider,
    pub model: Option<String>,
    /// Replaces the default instructions entirely when set.
    pub prompt: Option<String>,
    pub rubric: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNormalization {
    pub accuracy: NormalizedAccuracy,
    pub accuracy_shape: ShapeKind,
    pub ability: NormalizedAbility,
    pub ability_shape: ShapeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNormalization {
    pub project: ProjectEvaluation,
    pub shape: ShapeKind,
}

/// Normalized result, tagged by evaluation kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NormalizedEvaluation {
    Concept(ConceptNormalization),
    Project(ProjectNormalization),
}

impl NormalizedEvaluation {
    /// Normalize a parsed answer for `kind`. Never fails.
    pub fn from_parsed(kind: EvaluationKind, parsed: Option<&Value>) -> Self {
        match kind {
            EvaluationKind::Concept => {
                let accuracy = AccuracyShape::classify(parsed);
                let ability = AbilityShape::classify(parsed);
                NormalizedEvaluation::Concept(ConceptNormalization {
                    accuracy: accuracy.normalize(),
                    accuracy_shape: accuracy.kind(),
                    ability: ability.normalize(),
                    ability_shape: ability.kind(),
                })
            }
            EvaluationKind::Project => {
                let project = normalize_project(parsed);
                NormalizedEvaluation::Project(ProjectNormalization {
                    shape: project.kind(),
                    project,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    pub kind: EvaluationKind,
    pub raw: String,
    pub parsed: Option<Value>,
    pub evaluation: NormalizedEvaluation,
}

pub async fn evaluate_video(
    input: EvaluateVideoInput,
    evaluator: &dyn BaseVideoEvaluator,
) -> Result<EvaluationOutcome, EvaluationError> {
    if input.video_url.trim().is_empty() {
        return Err(EvaluationError::missing("videoUrl"));
    }
    if input.api_key.trim().is_empty() {
        return Err(EvaluationError::missing("apiKey"));
    }

    let prompt = match input.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(custom) => prompts::build_prompt_with(custom, input.rubric.as_deref()),
        None => prompts::build_prompt(input.kind, input.rubric.as_deref()),
    };

    let request = VideoEvaluationRequest {
        provider: input.provider,
        api_key: input.api_key,
        model: input.model,
        video_url: input.video_url.trim().to_string(),
        prompt,
        response_schema: Some(prompts::response_schema(input.kind)),
    };

    let text = evaluator
        .evaluate_video(&request)
        .await
        .map_err(EvaluationError::Upstream)?;

    let response = EvaluationResponse::from_text(text);
    let evaluation = NormalizedEvaluation::from_parsed(input.kind, response.parsed());

    info!(
        kind = %input.kind,
        provider = %request.provider,
        parsed = response.parsed.is_some(),
        "Video evaluated"
    );

    Ok(EvaluationOutcome {
        kind: input.kind,
        raw: response.raw,
        parsed: response.parsed,
        evaluation,
    })
}
