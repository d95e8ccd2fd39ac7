//! HTTP surface tests against the router with the in-memory store and a
//! scripted model.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use server_core::kernel::test_dependencies::{InMemoryEvaluationStore, MockVideoEvaluator};
use server_core::kernel::ModelProvider;
use server_core::server::build_app;

use common::{delete, get, post, test_deps, FENCED_CONCEPT_ANSWER, PROJECT_ANSWER};

#[tokio::test]
async fn evaluate_returns_raw_parsed_and_normalized() {
    let (deps, evaluator, _) = test_deps(
        MockVideoEvaluator::new().with_response(FENCED_CONCEPT_ANSWER),
        InMemoryEvaluationStore::new(),
    );
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/evaluate",
        json!({
            "videoUrl": "https://youtu.be/abc",
            "apiKey": "test-key",
            "rubric": "Explain Newton's second law"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "concept");
    assert_eq!(body["raw"], FENCED_CONCEPT_ANSWER);
    assert_eq!(body["evaluation"]["kind"], "concept");
    assert_eq!(body["evaluation"]["accuracyShape"], "structured");
    assert_eq!(body["evaluation"]["accuracy"]["score"], 92.0);
    assert_eq!(
        body["evaluation"]["accuracy"]["feedback"]["What can you do better?"],
        "More depth"
    );

    let calls = evaluator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].provider, ModelProvider::Gemini);
    assert_eq!(calls[0].video_url, "https://youtu.be/abc");
    assert!(calls[0].prompt.ends_with("Rubric:\nExplain Newton's second law"));
}

#[tokio::test]
async fn evaluate_project_with_openai() {
    let (deps, evaluator, _) = test_deps(
        MockVideoEvaluator::new().with_response(PROJECT_ANSWER),
        InMemoryEvaluationStore::new(),
    );
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/evaluate",
        json!({
            "videoUrl": "https://youtu.be/abc",
            "apiKey": "test-key",
            "kind": "project",
            "provider": "openai",
            "model": "gpt-4o-mini"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evaluation"]["kind"], "project");
    assert_eq!(body["evaluation"]["shape"], "structured");
    assert_eq!(body["evaluation"]["project"]["parameters"][1]["name"], "Depth");

    let calls = evaluator.calls();
    assert_eq!(calls[0].provider, ModelProvider::OpenAi);
    assert_eq!(calls[0].model.as_deref(), Some("gpt-4o-mini"));
}

#[tokio::test]
async fn evaluate_rejects_missing_fields() {
    let (deps, evaluator, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, body) = post(&app, "/evaluate", json!({"apiKey": "k"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "videoUrl is required"}));

    let (status, body) = post(&app, "/evaluate", json!({"videoUrl": "https://youtu.be/abc"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "apiKey is required"}));

    let (status, _) = post(
        &app,
        "/evaluate",
        json!({"videoUrl": "https://youtu.be/abc", "apiKey": "k", "kind": "essay"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(evaluator.calls().is_empty());
}

#[tokio::test]
async fn evaluate_maps_upstream_failure_to_bad_gateway() {
    let (deps, _, _) = test_deps(
        MockVideoEvaluator::new().failing("API key not valid"),
        InMemoryEvaluationStore::new(),
    );
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/evaluate",
        json!({"videoUrl": "https://youtu.be/abc", "apiKey": "bad"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Upstream model API error: API key not valid");
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (deps, _, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, body) = post(&app, "/evaluate", json!({"videoUrl": 42, "apiKey": "k"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn store_then_read_back_concept_evaluation() {
    let (deps, _, store) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/store-evaluation",
        json!({
            "email": "ada@example.com",
            "projectName": "Physics 101",
            "pageName": "Momentum",
            "videoUrl": "https://youtu.be/abc",
            "kind": "concept",
            "evaluation": FENCED_CONCEPT_ANSWER
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "concept");
    let id = body["id"].as_str().unwrap().to_string();

    let rows = store.concept_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].accuracy_score, Some(92.0));

    let (status, body) = get(&app, &format!("/concept-evaluation/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["pageName"], "Momentum");
    assert_eq!(body["accuracyScore"], 92.0);
}

#[tokio::test]
async fn store_accepts_wrapped_evaluate_output() {
    let (deps, _, store) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, _) = post(
        &app,
        "/store-evaluation",
        json!({
            "email": "ada@example.com",
            "projectName": "Robot arm",
            "videoUrl": "https://youtu.be/xyz",
            "kind": "project",
            "evaluation": {
                "raw": PROJECT_ANSWER,
                "parsed": serde_json::from_str::<serde_json::Value>(PROJECT_ANSWER).unwrap()
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let rows = store.project_rows();
    assert_eq!(
        rows[0].evaluation_summary_text,
        "Clarity (40%): Advanced; Depth (60%): Intermediate"
    );
    assert!(rows[0].evaluation_feedback_text.contains("✓ Good: Solid research"));
}

#[tokio::test]
async fn store_rejects_missing_email() {
    let (deps, _, store) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/store-evaluation",
        json!({
            "projectName": "Physics 101",
            "videoUrl": "https://youtu.be/abc",
            "kind": "concept",
            "evaluation": "{}"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "email is required"}));
    assert!(store.concept_rows().is_empty());
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let (deps, _, _) = test_deps(
        MockVideoEvaluator::new(),
        InMemoryEvaluationStore::failing("connection refused"),
    );
    let app = build_app(deps, &[]);

    let (status, body) = post(
        &app,
        "/store-evaluation",
        json!({
            "email": "ada@example.com",
            "projectName": "Physics 101",
            "videoUrl": "https://youtu.be/abc",
            "kind": "concept",
            "evaluation": "{}"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Persistence error: connection refused");
}

#[tokio::test]
async fn history_is_newest_first_and_paginated() {
    let (deps, _, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    for page in ["First", "Second", "Third"] {
        let (status, _) = post(
            &app,
            "/store-evaluation",
            json!({
                "email": "grace@example.com",
                "projectName": "Physics 101",
                "pageName": page,
                "videoUrl": "https://youtu.be/abc",
                "kind": "concept",
                "evaluation": "{}"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/concept-history?email=grace@example.com").await;
    assert_eq!(status, StatusCode::OK);
    let pages: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["pageName"].as_str().unwrap())
        .collect();
    assert_eq!(pages, vec!["Third", "Second", "First"]);

    let (_, body) = get(&app, "/concept-history?email=grace@example.com&limit=1&offset=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["pageName"], "Second");

    let (_, body) = get(&app, "/concept-history?email=nobody@example.com").await;
    assert_eq!(body, json!([]));

    let (_, body) = get(&app, "/project-history?email=grace@example.com").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn history_requires_email() {
    let (deps, _, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, body) = get(&app, "/project-history").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "email is required"}));
}

#[tokio::test]
async fn lookups_distinguish_bad_and_unknown_ids() {
    let (deps, _, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, _) = get(&app, "/concept-evaluation/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::now_v7();
    let (status, body) = get(&app, &format!("/project-evaluation/{}", unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Project evaluation not found"}));

    let (status, _) = delete(&app, &format!("/concept-evaluation/{}", unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_only_the_matching_kind() {
    let (deps, _, store) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (_, body) = post(
        &app,
        "/store-evaluation",
        json!({
            "email": "ada@example.com",
            "projectName": "Robot arm",
            "videoUrl": "https://youtu.be/xyz",
            "kind": "project",
            "evaluation": PROJECT_ANSWER
        }),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    // Same id under the other kind is a different table.
    let (status, _) = delete(&app, &format!("/concept-evaluation/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.project_rows().len(), 1);

    let (status, body) = delete(&app, &format!("/project-evaluation/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);
    assert!(store.project_rows().is_empty());

    let (status, _) = get(&app, &format!("/project-evaluation/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reflects_store_ping() {
    let (deps, _, _) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let (status, body) = get(&build_app(deps, &[]), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (deps, _, _) = test_deps(
        MockVideoEvaluator::new(),
        InMemoryEvaluationStore::failing("down"),
    );
    let (status, body) = get(&build_app(deps, &[]), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn store_accepts_text_wrapper_with_unparsed_evaluation() {
    let (deps, _, store) = test_deps(MockVideoEvaluator::new(), InMemoryEvaluationStore::new());
    let app = build_app(deps, &[]);

    let (status, _) = post(
        &app,
        "/store-evaluation",
        json!({
            "email": "ada@example.com",
            "projectName": "Physics 101",
            "videoUrl": "https://youtu.be/abc",
            "kind": "concept",
            "evaluation": {
                "text": "```json\n{\"Accuracy Level\":[{\"Accuracy Level\":\"80%\",\"Feedback\":\"ok\"}]}\n```",
                "parsed": null
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let rows = store.concept_rows();
    assert_eq!(rows[0].accuracy_score, Some(80.0));
    assert_eq!(rows[0].accuracy_feedback, "ok");
}
