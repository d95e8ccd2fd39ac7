// Postgres implementation of BaseEvaluationStore
//
// Thin adapter over the sqlx models in domains/evaluations/models.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BaseEvaluationStore, SavedEvaluation};
use crate::common::{ConceptEvaluationId, Page, ProjectEvaluationId};
use crate::domains::evaluations::models::{SavedConceptEvaluation, SavedProjectEvaluation};
use crate::domains::evaluations::shaping::{NewConceptEvaluation, NewProjectEvaluation};
use crate::domains::evaluations::EvaluationKind;

#[derive(Clone)]
pub struct PostgresEvaluationStore {
    pool: PgPool,
}

impl PostgresEvaluationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseEvaluationStore for PostgresEvaluationStore {
    async fn save_concept_evaluation(&self, record: NewConceptEvaluation) -> Result<ConceptEvaluationId> {
        let saved = SavedConceptEvaluation::create(&record, &self.pool).await?;
        tracing::info!(id = %saved.id, email = %saved.email, "Saved concept evaluation");
        Ok(saved.id)
    }

    async fn save_project_evaluation(&self, record: NewProjectEvaluation) -> Result<ProjectEvaluationId> {
        let saved = SavedProjectEvaluation::create(&record, &self.pool).await?;
        tracing::info!(id = %saved.id, email = %saved.email, "Saved project evaluation");
        Ok(saved.id)
    }

    async fn get_concept_history(&self, email: &str, page: Page) -> Result<Vec<SavedConceptEvaluation>> {
        SavedConceptEvaluation::find_by_email(email, page, &self.pool).await
    }

    async fn get_project_history(&self, email: &str, page: Page) -> Result<Vec<SavedProjectEvaluation>> {
        SavedProjectEvaluation::find_by_email(email, page, &self.pool).await
    }

    async fn get_evaluation_by_id(&self, id: Uuid, kind: EvaluationKind) -> Result<Option<SavedEvaluation>> {
        Ok(match kind {
            EvaluationKind::Concept => {
                SavedConceptEvaluation::find_by_id(ConceptEvaluationId::from_uuid(id), &self.pool)
                    .await?
                    .map(SavedEvaluation::Concept)
            }
            EvaluationKind::Project => {
                SavedProjectEvaluation::find_by_id(ProjectEvaluationId::from_uuid(id), &self.pool)
                    .await?
                    .map(SavedEvaluation::Project)
            }
        })
    }

    async fn delete_evaluation(&self, id: Uuid, kind: EvaluationKind) -> Result<bool> {
        let deleted = match kind {
            EvaluationKind::Concept => {
                SavedConceptEvaluation::delete(ConceptEvaluationId::from_uuid(id), &self.pool).await?
            }
            EvaluationKind::Project => {
                SavedProjectEvaluation::delete(ProjectEvaluationId::from_uuid(id), &self.pool).await?
            }
        };
        tracing::info!(%id, %kind, deleted, "Delete evaluation");
        Ok(deleted)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
