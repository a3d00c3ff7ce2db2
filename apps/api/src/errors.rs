use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::matching::MatchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Match(e) => match e {
                MatchError::EmbeddingUnavailable { .. } => {
                    tracing::error!("Embedding error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "EMBEDDING_UNAVAILABLE",
                        e.to_string(),
                    )
                }
                MatchError::ZeroVector { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ZERO_VECTOR",
                    e.to_string(),
                ),
                MatchError::DimensionMismatch { .. } => {
                    tracing::error!("Embedding error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "EMBEDDING_DIMENSION_MISMATCH",
                        e.to_string(),
                    )
                }
                MatchError::InvalidThreshold(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
                }
            },
            AppError::Extraction(ExtractionError::Llm(e)) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                e.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
