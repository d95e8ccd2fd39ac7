// TestDependencies - mock implementations for testing
//
// Provides a scripted video evaluator and an in-memory evaluation store that
// can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{BaseEvaluationStore, BaseVideoEvaluator, SavedEvaluation, VideoEvaluationRequest};
use crate::common::{ConceptEvaluationId, Page, ProjectEvaluationId};
use crate::domains::evaluations::models::{SavedConceptEvaluation, SavedProjectEvaluation};
use crate::domains::evaluations::shaping::{NewConceptEvaluation, NewProjectEvaluation};
use crate::domains::evaluations::EvaluationKind;

// =============================================================================
// Mock Video Evaluator
// =============================================================================

/// Arguments captured from an evaluate_video call
#[derive(Debug, Clone)]
pub struct EvaluateCallArgs {
    pub provider: super::ModelProvider,
    pub model: Option<String>,
    pub video_url: String,
    pub prompt: String,
    pub has_schema: bool,
}

pub struct MockVideoEvaluator {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<EvaluateCallArgs>>>,
}

impl MockVideoEvaluator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw model answer; answers are returned in FIFO order.
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(text.to_string());
        self
    }

    /// Make every call fail as an upstream API error would.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<EvaluateCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockVideoEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseVideoEvaluator for MockVideoEvaluator {
    async fn evaluate_video(&self, request: &VideoEvaluationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(EvaluateCallArgs {
            provider: request.provider,
            model: request.model.clone(),
            video_url: request.video_url.clone(),
            prompt: request.prompt.clone(),
            has_schema: request.response_schema.is_some(),
        });

        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(String::new())
        } else {
            Ok(responses.remove(0))
        }
    }
}

// =============================================================================
// In-memory Evaluation Store
// =============================================================================

#[derive(Default)]
struct StoreState {
    concept: Vec<SavedConceptEvaluation>,
    project: Vec<SavedProjectEvaluation>,
}

/// In-memory BaseEvaluationStore. Rows keep insertion order; each insert is
/// stamped one millisecond after the previous so history ordering is stable.
pub struct InMemoryEvaluationStore {
    state: Mutex<StoreState>,
    failure: Option<String>,
}

impl InMemoryEvaluationStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            failure: None,
        }
    }

    /// Make every operation fail as a database error would.
    pub fn failing(message: &str) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            failure: Some(message.to_string()),
        }
    }

    pub fn concept_rows(&self) -> Vec<SavedConceptEvaluation> {
        self.state.lock().unwrap().concept.clone()
    }

    pub fn project_rows(&self) -> Vec<SavedProjectEvaluation> {
        self.state.lock().unwrap().project.clone()
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }

    fn next_timestamp(state: &StoreState) -> chrono::DateTime<Utc> {
        let count = (state.concept.len() + state.project.len()) as i64;
        Utc::now() + Duration::milliseconds(count)
    }
}

impl Default for InMemoryEvaluationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(rows: impl DoubleEndedIterator<Item = T>, page: Page) -> Vec<T> {
    rows.rev()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl BaseEvaluationStore for InMemoryEvaluationStore {
    async fn save_concept_evaluation(&self, record: NewConceptEvaluation) -> Result<ConceptEvaluationId> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let id = ConceptEvaluationId::new();
        let created_at = Self::next_timestamp(&state);
        state
            .concept
            .push(SavedConceptEvaluation::from_new(id, record, created_at));
        Ok(id)
    }

    async fn save_project_evaluation(&self, record: NewProjectEvaluation) -> Result<ProjectEvaluationId> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let id = ProjectEvaluationId::new();
        let created_at = Self::next_timestamp(&state);
        state
            .project
            .push(SavedProjectEvaluation::from_new(id, record, created_at));
        Ok(id)
    }

    async fn get_concept_history(&self, email: &str, page: Page) -> Result<Vec<SavedConceptEvaluation>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(page_of(
            state.concept.iter().filter(|r| r.email == email).cloned(),
            page,
        ))
    }

    async fn get_project_history(&self, email: &str, page: Page) -> Result<Vec<SavedProjectEvaluation>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(page_of(
            state.project.iter().filter(|r| r.email == email).cloned(),
            page,
        ))
    }

    async fn get_evaluation_by_id(&self, id: Uuid, kind: EvaluationKind) -> Result<Option<SavedEvaluation>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(match kind {
            EvaluationKind::Concept => state
                .concept
                .iter()
                .find(|r| r.id.into_uuid() == id)
                .cloned()
                .map(SavedEvaluation::Concept),
            EvaluationKind::Project => state
                .project
                .iter()
                .find(|r| r.id.into_uuid() == id)
                .cloned()
                .map(SavedEvaluation::Project),
        })
    }

    async fn delete_evaluation(&self, id: Uuid, kind: EvaluationKind) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.concept.len() + state.project.len();
        match kind {
            EvaluationKind::Concept => state.concept.retain(|r| r.id.into_uuid() != id),
            EvaluationKind::Project => state.project.retain(|r| r.id.into_uuid() != id),
        }
        Ok(state.concept.len() + state.project.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}
