//! Evaluation endpoints: run a model evaluation, store it, and browse or
//! delete stored results.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::common::PageArgs;
use crate::domains::evaluations::activities::{
    evaluate_video, store_evaluation, EvaluateVideoInput, EvaluationOutcome, StoreEvaluationInput,
    StoredEvaluation,
};
use crate::domains::evaluations::models::{SavedConceptEvaluation, SavedProjectEvaluation};
use crate::domains::evaluations::{EvaluationError, EvaluationKind};
use crate::kernel::{ModelProvider, SavedEvaluation, ServerDeps};
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub video_url: Option<String>,
    pub api_key: Option<String>,
    pub kind: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub rubric: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEvaluationRequest {
    pub email: Option<String>,
    pub project_name: Option<String>,
    pub page_name: Option<String>,
    pub video_url: Option<String>,
    pub kind: Option<String>,
    pub evaluation: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub email: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

fn required(value: Option<String>, field: &str) -> Result<String, EvaluationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EvaluationError::missing(field))
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

fn not_found(kind: EvaluationKind) -> ApiError {
    match kind {
        EvaluationKind::Concept => ApiError::NotFound("Concept evaluation not found".to_string()),
        EvaluationKind::Project => ApiError::NotFound("Project evaluation not found".to_string()),
    }
}

/// POST /evaluate
pub async fn evaluate_handler(
    Extension(deps): Extension<ServerDeps>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationOutcome>, ApiError> {
    let Json(request) = payload?;

    let input = EvaluateVideoInput {
        video_url: required(request.video_url, "videoUrl")?,
        api_key: required(request.api_key, "apiKey")?,
        kind: match optional(request.kind) {
            Some(kind) => kind.parse()?,
            None => EvaluationKind::Concept,
        },
        provider: match optional(request.provider) {
            Some(provider) => provider.parse::<ModelProvider>()?,
            None => ModelProvider::default(),
        },
        model: optional(request.model),
        prompt: request.prompt,
        rubric: request.rubric,
    };

    let outcome = evaluate_video(input, deps.evaluator.as_ref()).await?;
    Ok(Json(outcome))
}

/// POST /store-evaluation
pub async fn store_evaluation_handler(
    Extension(deps): Extension<ServerDeps>,
    payload: Result<Json<StoreEvaluationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredEvaluation>), ApiError> {
    let Json(request) = payload?;

    let input = StoreEvaluationInput {
        email: required(request.email, "email")?,
        project_name: required(request.project_name, "projectName")?,
        page_name: request.page_name,
        video_url: required(request.video_url, "videoUrl")?,
        kind: required(request.kind, "kind")?.parse()?,
        evaluation: request
            .evaluation
            .ok_or_else(|| EvaluationError::missing("evaluation"))?,
    };

    let stored = store_evaluation(input, deps.store.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /concept-history
pub async fn concept_history_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedConceptEvaluation>>, ApiError> {
    let Query(query) = query?;
    let email = required(query.email, "email")?;
    let page = PageArgs {
        limit: query.limit,
        offset: query.offset,
    }
    .validate();

    let rows = deps
        .store
        .get_concept_history(email.trim(), page)
        .await
        .map_err(ApiError::Persistence)?;
    Ok(Json(rows))
}

/// GET /project-history
pub async fn project_history_handler(
    Extension(deps): Extension<ServerDeps>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedProjectEvaluation>>, ApiError> {
    let Query(query) = query?;
    let email = required(query.email, "email")?;
    let page = PageArgs {
        limit: query.limit,
        offset: query.offset,
    }
    .validate();

    let rows = deps
        .store
        .get_project_history(email.trim(), page)
        .await
        .map_err(ApiError::Persistence)?;
    Ok(Json(rows))
}

async fn get_evaluation(
    deps: &ServerDeps,
    raw_id: &str,
    kind: EvaluationKind,
) -> Result<SavedEvaluation, ApiError> {
    let id = parse_id(raw_id)?;
    deps.store
        .get_evaluation_by_id(id, kind)
        .await
        .map_err(ApiError::Persistence)?
        .ok_or_else(|| not_found(kind))
}

async fn delete_evaluation(
    deps: &ServerDeps,
    raw_id: &str,
    kind: EvaluationKind,
) -> Result<DeleteResponse, ApiError> {
    let id = parse_id(raw_id)?;
    let deleted = deps
        .store
        .delete_evaluation(id, kind)
        .await
        .map_err(ApiError::Persistence)?;

    if !deleted {
        return Err(not_found(kind));
    }
    tracing::info!(%id, kind = %kind, "Evaluation deleted");
    Ok(DeleteResponse { deleted, id })
}

/// GET /concept-evaluation/:id
pub async fn get_concept_evaluation_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> Result<Json<SavedEvaluation>, ApiError> {
    get_evaluation(&deps, &id, EvaluationKind::Concept).await.map(Json)
}

/// DELETE /concept-evaluation/:id
pub async fn delete_concept_evaluation_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    delete_evaluation(&deps, &id, EvaluationKind::Concept).await.map(Json)
}

/// GET /project-evaluation/:id
pub async fn get_project_evaluation_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> Result<Json<SavedEvaluation>, ApiError> {
    get_evaluation(&deps, &id, EvaluationKind::Project).await.map(Json)
}

/// DELETE /project-evaluation/:id
pub async fn delete_project_evaluation_handler(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    delete_evaluation(&deps, &id, EvaluationKind::Project).await.map(Json)
}
