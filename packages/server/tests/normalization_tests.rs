//! End-to-end properties of the extraction -> normalization -> shaping path.

mod common;

use common::{FENCED_CONCEPT_ANSWER, PROJECT_ANSWER};
use serde_json::{json, Value};
use server_core::domains::evaluations::models::{Feedback, StructuredFeedback};
use server_core::domains::evaluations::normalize::{
    extract_percentage_score, normalize, normalize_ability, normalize_accuracy, normalize_project,
    NormalizationTarget, Normalized, NormalizedAccuracy,
};
use server_core::domains::evaluations::shaping::{
    project_feedback_text, shape_concept_record, SubmissionContext,
};
use server_core::domains::evaluations::EvaluationResponse;

fn accuracy_of(text: &str) -> NormalizedAccuracy {
    let response = EvaluationResponse::from_text(text);
    normalize_accuracy(response.parsed())
}

#[test]
fn valid_json_parses_unchanged() {
    let inputs = [
        r#"{"a":1,"b":[true,null,"x"]}"#,
        "[1,2,3]",
        "\"just a string\"",
        "42",
        r#"{"nested":{"deep":{"value":-0.5}}}"#,
    ];

    for input in inputs {
        let expected: Value = serde_json::from_str(input).unwrap();
        assert_eq!(EvaluationResponse::from_text(input).parsed, Some(expected), "input: {}", input);
    }
}

#[test]
fn fenced_json_round_trips_without_stray_braces() {
    let object = json!({"criteria": [{"score": 7, "feedback": "ok"}], "note": "a, b"});
    let text = format!("blah blah ```json\n{}\n``` blah", object);

    assert_eq!(EvaluationResponse::from_text(text).parsed, Some(object));
}

#[test]
fn garbage_never_panics() {
    let inputs = [
        "",
        "   ",
        "{",
        "}{",
        "{\"unterminated\": ",
        "\u{0}\u{1}\u{fffd}binary\u{7f}",
        "```json\n```",
        "{} {} {}",
    ];

    for input in inputs {
        let response = EvaluationResponse::from_text(input);
        let parsed = response.parsed();
        let _ = normalize_accuracy(parsed);
        let _ = normalize_ability(parsed);
        let _ = normalize_project(parsed);
    }
}

#[test]
fn legacy_criteria_scores_are_clamped() {
    for (score, expected) in [(-5, 1.0), (15, 10.0), (7, 7.0)] {
        let parsed = json!({"criteria": [{"score": score, "feedback": "fb"}]});
        assert_eq!(normalize_accuracy(Some(&parsed)).score, Some(expected), "score {}", score);
    }
}

#[test]
fn percentage_formats_are_recognised() {
    assert_eq!(extract_percentage_score("85%"), Some(85.0));
    assert_eq!(extract_percentage_score("78 out of 100"), Some(78.0));
    assert_eq!(extract_percentage_score("62/100"), Some(62.0));
    assert_eq!(extract_percentage_score("not sure"), None);

    let parsed = json!({"Accuracy Level": [{"Accuracy Level": "78 out of 100", "Feedback": "ok"}]});
    assert_eq!(normalize_accuracy(Some(&parsed)).score, Some(78.0));
}

#[test]
fn structured_and_legacy_parameter_feedback_render_differently() {
    let project = normalize_project(EvaluationResponse::from_text(PROJECT_ANSWER).parsed());
    let text = project_feedback_text(&project);

    assert_eq!(
        text,
        "Clarity:\n\
         ✓ What could you do well?: Clear structure\n\
         ✗ What can you do better?: Slow down\n\
         ⚠ Next Suggested Deep Dive?: Storytelling\n\
         \n\
         Depth:\n\
         ✓ Good: Solid research\n\
         ✗ Bad: Few sources\n\
         ⚠ Improvements: Cite papers"
    );
}

#[test]
fn fenced_structured_answer_end_to_end() {
    let accuracy = accuracy_of(FENCED_CONCEPT_ANSWER);

    assert_eq!(
        accuracy,
        NormalizedAccuracy {
            score: Some(92.0),
            feedback: Feedback::Structured(StructuredFeedback {
                strengths: "Good structure".into(),
                improvements: "More depth".into(),
                next_steps: "Study X".into(),
            }),
        }
    );

    // The internal field names marshal back to the prompted keys.
    let record = shape_concept_record(
        SubmissionContext {
            email: "student@example.com".into(),
            project_name: "Physics".into(),
            page_name: None,
            video_url: "https://youtu.be/abc".into(),
        },
        &accuracy,
        &normalize_ability(None),
    );
    let stored: Value = serde_json::from_str(&record.accuracy_feedback).unwrap();
    assert_eq!(
        stored,
        json!({
            "What could you do well?": "Good structure",
            "What can you do better?": "More depth",
            "Next Suggested Deep Dive?": "Study X"
        })
    );
}

#[test]
fn empty_answer_normalizes_to_empty_fields() {
    let response = EvaluationResponse::from_text("");
    assert_eq!(response.raw, "");
    assert_eq!(response.parsed, None);

    let accuracy = normalize_accuracy(response.parsed());
    assert_eq!(accuracy.score, None);
    assert_eq!(accuracy.feedback, Feedback::Text(String::new()));

    assert_eq!(
        normalize(NormalizationTarget::Accuracy, response.parsed()),
        Normalized::Accuracy(NormalizedAccuracy::default())
    );
}
