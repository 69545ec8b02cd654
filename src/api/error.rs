//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::app_state::CoreError;
use crate::classifier::ClassifierError;
use crate::db::DatabaseError;
use crate::games::tracing::OutlineError;
use crate::screening::ScreeningError;

/// Structured error response body for the frontend.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::ClassifierUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CLASSIFIER_UNAVAILABLE",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id}"))
            }
            DatabaseError::ConstraintViolation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Database(db) => db.into(),
            CoreError::LockPoisoned => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ScreeningError> for ApiError {
    fn from(e: ScreeningError) -> Self {
        match e {
            ScreeningError::Classifier(c) => c.into(),
            ScreeningError::Database(db) => db.into(),
        }
    }
}

impl From<ClassifierError> for ApiError {
    fn from(e: ClassifierError) -> Self {
        // Every classifier failure is surfaced to the caller; the old
        // behavior of quietly leaving the result blank is a defect.
        ApiError::ClassifierUnavailable(e.to_string())
    }
}

impl From<OutlineError> for ApiError {
    fn from(e: OutlineError) -> Self {
        match e {
            OutlineError::Decode(msg) => ApiError::BadRequest(format!("Image decode failed: {msg}")),
            OutlineError::Encode(msg) => ApiError::Internal(msg),
        }
    }
}
