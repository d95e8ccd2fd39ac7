use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ConceptEvaluationId, Page};
use crate::domains::evaluations::shaping::NewConceptEvaluation;

/// A persisted concept evaluation (accuracy + ability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedConceptEvaluation {
    pub id: ConceptEvaluationId,
    pub email: String,
    pub project_name: String,
    pub page_name: Option<String>,
    pub video_url: String,
    pub accuracy_score: Option<f64>,
    pub accuracy_feedback: String,
    pub ability_level: String,
    pub ability_feedback: String,
    pub created_at: DateTime<Utc>,
}

impl SavedConceptEvaluation {
    /// Build the row an insert of `record` produces.
    pub fn from_new(id: ConceptEvaluationId, record: NewConceptEvaluation, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: record.email,
            project_name: record.project_name,
            page_name: record.page_name,
            video_url: record.video_url,
            accuracy_score: record.accuracy_score,
            accuracy_feedback: record.accuracy_feedback,
            ability_level: record.ability_level,
            ability_feedback: record.ability_feedback,
            created_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

impl SavedConceptEvaluation {
    pub async fn create(record: &NewConceptEvaluation, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO concept_evaluations (
                id, email, project_name, page_name, video_url,
                accuracy_score, accuracy_feedback, ability_level, ability_feedback
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(ConceptEvaluationId::new())
        .bind(&record.email)
        .bind(&record.project_name)
        .bind(&record.page_name)
        .bind(&record.video_url)
        .bind(record.accuracy_score)
        .bind(&record.accuracy_feedback)
        .bind(&record.ability_level)
        .bind(&record.ability_feedback)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ConceptEvaluationId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM concept_evaluations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// History for one student, newest first.
    pub async fn find_by_email(email: &str, page: Page, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM concept_evaluations
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

    /// Returns `false` when no row had this ID.
    pub async fn delete(id: ConceptEvaluationId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM concept_evaluations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
