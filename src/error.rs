// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{exam::ExamError, services::question_bank::BankError};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (operation not allowed in the current exam state)
    Conflict(String),

    // 413 Payload Too Large (camera frame over the configured limit)
    PayloadTooLarge(String),

    // 503 Service Unavailable (question bank missing or malformed)
    ServiceUnavailable(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Rejected transitions keep their user-facing message.
impl From<ExamError> for AppError {
    fn from(err: ExamError) -> Self {
        let msg = err.to_string();
        match err {
            ExamError::InvalidFormat
            | ExamError::EmptySubmission
            | ExamError::QuestionOutOfRange { .. }
            | ExamError::InvalidChoice { .. } => AppError::BadRequest(msg),
            ExamError::PasswordMismatch => AppError::AuthError(msg),
            ExamError::FaceNotDetected
            | ExamError::PresenceCheckRequired
            | ExamError::WrongState { .. } => AppError::Conflict(msg),
            ExamError::BankUnavailable => AppError::ServiceUnavailable(msg),
        }
    }
}

/// The student only learns that the bank is unavailable; the cause goes to the log.
impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        tracing::error!("Question bank unavailable: {}", err);
        AppError::from(ExamError::BankUnavailable)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
