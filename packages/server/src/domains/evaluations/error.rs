use thiserror::Error;

/// Failures that end an evaluation request.
///
/// Parse and shape problems are recovered inside normalization and never
/// show up here.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A required request field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The model provider call failed (bad key, quota, network).
    #[error("Upstream model API error: {0:#}")]
    Upstream(anyhow::Error),

    /// A database read or write failed.
    #[error("Persistence error: {0:#}")]
    Persistence(anyhow::Error),
}

impl EvaluationError {
    pub fn missing(field: &str) -> Self {
        EvaluationError::Validation(format!("{} is required", field))
    }
}
