//! Error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! Each code has a client-facing identifier, an integer for logs and a
//! default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Conflict;
//! assert_eq!(code.as_str(), "CONFLICT");
//! assert_eq!(code.code(), 1008);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request payload failed validation
    ValidationError,

    /// Request body could not be read as JSON
    JsonExtraction,

    NotFound,

    /// Request conflicts with an existing resource
    Conflict,

    MethodNotAllowed,

    // Server errors
    InternalError,

    // Storage errors (2000-2999)
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::MethodNotAllowed => 1012,

            Self::DatabaseError => 2003,
        }
    }

    /// Message used when the caller supplies none.
    ///
    /// Server-side codes share one generic text so internals never leak.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::Conflict => "Resource already exists",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError | Self::DatabaseError => GENERIC_SERVER_ERROR,
        }
    }
}

/// Body text for every 5xx caused by an internal fault.
pub const GENERIC_SERVER_ERROR: &str = "An error occurred while processing your request.";

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
