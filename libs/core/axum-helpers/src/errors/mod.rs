pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::{ErrorCode, GENERIC_SERVER_ERROR};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error body returned by every endpoint.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "An item with the same ID already exists."
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that renders as an [`ErrorResponse`].
///
/// Server-side variants are logged with their details at `error` and
/// answered with [`GENERIC_SERVER_ERROR`]; client-side variants are logged
/// at `info`/`warn` and echo their message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn parts(self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Database(details) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), %details, "Storage error");
                server_fault(ErrorCode::DatabaseError)
            }
            AppError::InternalServerError(details) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), %details, "Internal server error");
                server_fault(ErrorCode::InternalError)
            }
            // Well-formed JSON that does not fit the target type is a validation failure
            AppError::JsonExtractorRejection(JsonRejection::JsonDataError(e)) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Invalid request body: {}", e.body_text());
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, e.body_text())
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), error = ?e, "JSON extraction failed");
                (e.status(), ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorCode::Conflict, msg)
            }
        }
    }
}

fn server_fault(code: ErrorCode) -> (StatusCode, ErrorCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        code.default_message().to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Build an error response outside of [`AppError`], e.g. in fallbacks.
pub fn error_response(status: StatusCode, message: impl Into<String>, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_echoes_message() {
        let (status, body) = render(AppError::BadRequest("ID mismatch.".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, 1001);
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.message, "ID mismatch.");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let (status, body) = render(AppError::Conflict("duplicate".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error, "CONFLICT");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) =
            render(AppError::Database("connection reset by peer".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, GENERIC_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) =
            render(AppError::InternalServerError("lock poisoned".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("poisoned"));
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new(ErrorCode::NotFound, "gone")).unwrap();
        assert_eq!(json["code"], 1004);
        assert!(json.get("details").is_none());
    }
}
