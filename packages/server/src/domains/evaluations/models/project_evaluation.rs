use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Page, ProjectEvaluationId};
use crate::domains::evaluations::shaping::NewProjectEvaluation;

/// A persisted project evaluation.
///
/// `evaluation_json` holds the model's full JSON answer as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedProjectEvaluation {
    pub id: ProjectEvaluationId,
    pub email: String,
    pub project_name: String,
    pub video_url: String,
    pub evaluation_summary_text: String,
    pub evaluation_feedback_text: String,
    pub evaluation_json: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedProjectEvaluation {
    pub fn from_new(id: ProjectEvaluationId, record: NewProjectEvaluation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: record.email,
            project_name: record.project_name,
            video_url: record.video_url,
            evaluation_summary_text: record.evaluation_summary_text,
            evaluation_feedback_text: record.evaluation_feedback_text,
            evaluation_json: record.evaluation_json,
            created_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

impl SavedProjectEvaluation {
    pub async fn create(record: &NewProjectEvaluation, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO project_evaluations (
                id, email, project_name, video_url,
                evaluation_summary_text, evaluation_feedback_text, evaluation_json
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(ProjectEvaluationId::new())
        .bind(&record.email)
        .bind(&record.project_name)
        .bind(&record.video_url)
        .bind(&record.evaluation_summary_text)
        .bind(&record.evaluation_feedback_text)
        .bind(&record.evaluation_json)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ProjectEvaluationId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM project_evaluations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, page: Page, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM project_evaluations
            WHERE email = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(email)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: ProjectEvaluationId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM project_evaluations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
