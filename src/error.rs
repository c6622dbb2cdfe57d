use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::any::Any;

use crate::services::flashcard_service::DbError;
use crate::services::generation_client::GenerationError;
use crate::services::response_parser::ParseError;

/// HTTP 层统一错误类型，响应体为 `{"detail": ..., "code": ...}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 请求体字段合法但取值不合法 (如 n 超出范围)
    #[error("Unprocessable request: {0}")]
    Validation(String),

    #[error(transparent)]
    Unparsable(#[from] ParseError),

    #[error("AI returned empty or invalid result.")]
    EmptyResult,

    #[error(transparent)]
    Upstream(#[from] GenerationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Db(DbError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            AppError::Db(DbError::InvalidInput(msg)) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }
            AppError::Db(DbError::Sqlx(err)) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Unparsable(err) => {
                tracing::warn!(error = %err, "Parse/validation error");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSABLE_RESPONSE",
                    "AI failed to generate flashcards in the expected format.".to_string(),
                )
            }
            AppError::EmptyResult => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_RESULT", self.to_string())
            }
            AppError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream generation error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    format!("Upstream error: {err}"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "detail": message, "code": code }))).into_response()
    }
}

/// 给 `CatchPanicLayer` 用，panic 时也返回统一的 500 响应体
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::Internal(detail).into_response()
}
