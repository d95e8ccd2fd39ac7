//! Test fixtures: canned model answers and insertable records.

use std::sync::Arc;

use server_core::domains::evaluations::shaping::{NewConceptEvaluation, NewProjectEvaluation};
use server_core::kernel::test_dependencies::{InMemoryEvaluationStore, MockVideoEvaluator};
use server_core::kernel::ServerDeps;

/// Structured concept answer wrapped in prose and a ```json fence.
pub const FENCED_CONCEPT_ANSWER: &str = "Here is the result:\n```json\n{\"Accuracy Level\":[{\"Accuracy Level\":\"92%\",\"Feedback\":{\"What could you do well?\":\"Good structure\",\"What can you do better?\":\"More depth\",\"Next Suggested Deep Dive?\":\"Study X\"}}]}\n```";

pub const PROJECT_ANSWER: &str = r#"{
  "parameters": [
    {
      "name": "Clarity",
      "weightage": 40,
      "level": "Advanced",
      "feedback": {
        "What could you do well?": "Clear structure",
        "What can you do better?": "Slow down",
        "Next Suggested Deep Dive?": "Storytelling"
      }
    },
    {
      "name": "Depth",
      "weightage": 60,
      "level": "Intermediate",
      "feedback": {"good": "Solid research", "bad": "Few sources", "ugly": "Cite papers"}
    }
  ]
}"#;

/// ServerDeps wired with the in-memory store and a scripted evaluator.
pub fn test_deps(
    evaluator: MockVideoEvaluator,
    store: InMemoryEvaluationStore,
) -> (ServerDeps, Arc<MockVideoEvaluator>, Arc<InMemoryEvaluationStore>) {
    let evaluator = Arc::new(evaluator);
    let store = Arc::new(store);
    let deps = ServerDeps::new(store.clone(), evaluator.clone());
    (deps, evaluator, store)
}

pub fn concept_record(email: &str, page_name: &str, score: f64) -> NewConceptEvaluation {
    NewConceptEvaluation {
        email: email.to_string(),
        project_name: "Physics 101".to_string(),
        page_name: Some(page_name.to_string()),
        video_url: "https://youtu.be/abc".to_string(),
        accuracy_score: Some(score),
        accuracy_feedback: "Mostly right".to_string(),
        ability_level: "Advanced".to_string(),
        ability_feedback: "Clear".to_string(),
    }
}

pub fn project_record(email: &str, project_name: &str) -> NewProjectEvaluation {
    NewProjectEvaluation {
        email: email.to_string(),
        project_name: project_name.to_string(),
        video_url: "https://youtu.be/xyz".to_string(),
        evaluation_summary_text: "Clarity (40%): Advanced".to_string(),
        evaluation_feedback_text: "Clarity:\n✓ What could you do well?: Clear structure".to_string(),
        evaluation_json: Some(r#"{"parameters":[]}"#.to_string()),
    }
}
