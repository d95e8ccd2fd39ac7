//! Default prompts and Gemini response schemas.
//!
//! Field names in the schemas are the ones the normalizer reads; the
//! wording around them is free to change.

use serde_json::{json, Value};

use super::models::{IMPROVEMENTS_KEY, NEXT_STEPS_KEY, STRENGTHS_KEY};
use super::EvaluationKind;

pub const ABILITY_LEVELS: [&str; 4] = [
    "Beginner",
    "Intermediate",
    "Advanced",
    "Expert (Feynman Level)",
];

const CONCEPT_INSTRUCTIONS: &str = "You are reviewing a student's video in which they explain a concept. \
Judge how accurate the explanation is as a percentage, and how well the student is able to explain it. \
For each judgement answer three questions: what the student did well, what they can do better, \
and what topic they should dive into next.";

const PROJECT_INSTRUCTIONS: &str = "You are reviewing a student's video presenting a project. \
Score the project against each rubric parameter. For every parameter give its weightage (0-100), \
the level reached, and feedback answering what the student did well, what they can do better, \
and what topic they should dive into next.";

/// Prompt text for `kind`, with an optional rubric appended verbatim.
pub fn build_prompt(kind: EvaluationKind, rubric: Option<&str>) -> String {
    let instructions = match kind {
        EvaluationKind::Concept => CONCEPT_INSTRUCTIONS,
        EvaluationKind::Project => PROJECT_INSTRUCTIONS,
    };

    build_prompt_with(instructions, rubric)
}

/// Caller-supplied instructions with the same rubric handling.
pub fn build_prompt_with(instructions: &str, rubric: Option<&str>) -> String {
    match rubric.map(str::trim).filter(|r| !r.is_empty()) {
        Some(rubric) => format!("{}\n\nRubric:\n{}", instructions, rubric),
        None => instructions.to_string(),
    }
}

/// Gemini `responseSchema` for `kind`.
pub fn response_schema(kind: EvaluationKind) -> Value {
    match kind {
        EvaluationKind::Concept => concept_schema(),
        EvaluationKind::Project => project_schema(),
    }
}

fn feedback_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            STRENGTHS_KEY: {"type": "STRING"},
            IMPROVEMENTS_KEY: {"type": "STRING"},
            NEXT_STEPS_KEY: {"type": "STRING"}
        },
        "required": [STRENGTHS_KEY, IMPROVEMENTS_KEY, NEXT_STEPS_KEY]
    })
}

fn concept_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "Accuracy Level": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "Accuracy Level": {"type": "STRING", "description": "Accuracy as a percentage, e.g. \"85%\""},
                        "Feedback": feedback_schema()
                    },
                    "required": ["Accuracy Level", "Feedback"]
                }
            },
            "Ability to explain": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "Ability to explain": {"type": "STRING", "enum": ABILITY_LEVELS},
                        "Structured Feedback": feedback_schema()
                    },
                    "required": ["Ability to explain", "Structured Feedback"]
                }
            }
        },
        "required": ["Accuracy Level", "Ability to explain"]
    })
}

fn project_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "parameters": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "weightage": {"type": "NUMBER"},
                        "level": {"type": "STRING"},
                        "feedback": feedback_schema()
                    },
                    "required": ["name", "weightage", "level", "feedback"]
                }
            }
        },
        "required": ["parameters"]
    })
}
