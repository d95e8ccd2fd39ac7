//! Video evaluation domain: model output extraction, normalization,
//! record shaping and persistence.

pub mod activities;
pub mod error;
pub mod extraction;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod shaping;

pub use error::EvaluationError;
pub use extraction::EvaluationResponse;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of stored evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    Concept,
    Project,
}

impl EvaluationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationKind::Concept => "concept",
            EvaluationKind::Project => "project",
        }
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationKind {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concept" => Ok(EvaluationKind::Concept),
            "project" => Ok(EvaluationKind::Project),
            other => Err(EvaluationError::Validation(format!(
                "kind must be 'concept' or 'project', got '{}'",
                other
            ))),
        }
    }
}
