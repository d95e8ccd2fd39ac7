// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Extraction, normalization and shaping live in domains/evaluations and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseVideoEvaluator, BaseEvaluationStore)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::{ConceptEvaluationId, Page, ProjectEvaluationId};
use crate::domains::evaluations::models::{SavedConceptEvaluation, SavedProjectEvaluation};
use crate::domains::evaluations::shaping::{NewConceptEvaluation, NewProjectEvaluation};
use crate::domains::evaluations::{EvaluationError, EvaluationKind};

// =============================================================================
// Video Evaluator Trait (Infrastructure - LLM call)
// =============================================================================

/// Which model provider answers an evaluation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
    OpenAi,
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::Gemini => f.write_str("gemini"),
            ModelProvider::OpenAi => f.write_str("openai"),
        }
    }
}

impl FromStr for ModelProvider {
    type Err = EvaluationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ModelProvider::Gemini),
            "openai" => Ok(ModelProvider::OpenAi),
            other => Err(EvaluationError::Validation(format!(
                "provider must be 'gemini' or 'openai', got '{}'",
                other
            ))),
        }
    }
}

/// Everything a provider needs to evaluate one video.
#[derive(Debug, Clone)]
pub struct VideoEvaluationRequest {
    pub provider: ModelProvider,
    /// Caller-supplied provider key; never logged.
    pub api_key: String,
    /// Overrides the evaluator's default model for this provider.
    pub model: Option<String>,
    pub video_url: String,
    pub prompt: String,
    pub response_schema: Option<serde_json::Value>,
}

#[async_trait]
pub trait BaseVideoEvaluator: Send + Sync {
    /// Evaluate a video and return the model's final text.
    async fn evaluate_video(&self, request: &VideoEvaluationRequest) -> Result<String>;
}

// =============================================================================
// Evaluation Store Trait (Infrastructure - persistence)
// =============================================================================

/// A stored evaluation of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SavedEvaluation {
    Concept(SavedConceptEvaluation),
    Project(SavedProjectEvaluation),
}

/// Append-only evaluation storage. Rows are only removed by explicit ID.
#[async_trait]
pub trait BaseEvaluationStore: Send + Sync {
    async fn save_concept_evaluation(&self, record: NewConceptEvaluation) -> Result<ConceptEvaluationId>;

    async fn save_project_evaluation(&self, record: NewProjectEvaluation) -> Result<ProjectEvaluationId>;

    /// Newest first.
    async fn get_concept_history(&self, email: &str, page: Page) -> Result<Vec<SavedConceptEvaluation>>;

    /// Newest first.
    async fn get_project_history(&self, email: &str, page: Page) -> Result<Vec<SavedProjectEvaluation>>;

    async fn get_evaluation_by_id(&self, id: Uuid, kind: EvaluationKind) -> Result<Option<SavedEvaluation>>;

    /// Returns `false` when nothing had this ID.
    async fn delete_evaluation(&self, id: Uuid, kind: EvaluationKind) -> Result<bool>;

    /// Cheap liveness check for `/health`.
    async fn ping(&self) -> Result<()>;
}
