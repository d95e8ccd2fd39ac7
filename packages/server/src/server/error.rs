//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "error": "<message>" }` with a status
//! chosen by variant.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domains::evaluations::EvaluationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid evaluation id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Upstream model API error: {0:#}")]
    Upstream(anyhow::Error),

    #[error("Persistence error: {0:#}")]
    Persistence(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Upstream(e) => tracing::error!(error = %format!("{:#}", e), "Model call failed"),
            ApiError::Persistence(e) => tracing::error!(error = %format!("{:#}", e), "Database operation failed"),
            _ => tracing::debug!(status = %status, error = %self, "Request rejected"),
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<EvaluationError> for ApiError {
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::Validation(message) => ApiError::Validation(message),
            EvaluationError::Upstream(e) => ApiError::Upstream(e),
            EvaluationError::Persistence(e) => ApiError::Persistence(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
