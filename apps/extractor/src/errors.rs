use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::workflow::state::DocumentKind;

/// Application-level error type.
///
/// Every fatal failure of a run lands in one of the domain variants below, tagged with the
/// document kind it came from. Implements `IntoResponse` so Axum handlers can return
/// `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required source reference is missing for the requested mode. Raised before any
    /// collaborator call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The document could not be read, has an unsupported format, or OCR failed.
    #[error("Extraction I/O error ({kind}): {message}")]
    ExtractionIo { kind: DocumentKind, message: String },

    /// The extraction model could not produce a record conforming to the schema.
    #[error("Schema extraction error ({kind}): {message}")]
    SchemaExtraction { kind: DocumentKind, message: String },

    /// The judge could not be reached or returned a malformed verdict.
    /// Never treated as an implicit PASS.
    #[error("Judge unavailable ({kind}): {message}")]
    JudgeUnavailable { kind: DocumentKind, message: String },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The document kind a fatal run error pertains to, if any.
    pub fn kind(&self) -> Option<DocumentKind> {
        match self {
            AppError::ExtractionIo { kind, .. }
            | AppError::SchemaExtraction { kind, .. }
            | AppError::JudgeUnavailable { kind, .. } => Some(*kind),
            AppError::Validation(_) | AppError::Internal(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ExtractionIo { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_IO_ERROR",
                self.to_string(),
            ),
            AppError::SchemaExtraction { .. } => (
                StatusCode::BAD_GATEWAY,
                "SCHEMA_EXTRACTION_ERROR",
                self.to_string(),
            ),
            AppError::JudgeUnavailable { .. } => (
                StatusCode::BAD_GATEWAY,
                "JUDGE_UNAVAILABLE",
                self.to_string(),
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
