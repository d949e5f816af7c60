use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

pub const ITEM_NOT_FOUND: &str = "Item not found.";
pub const ITEM_ALREADY_EXISTS: &str = "An item with the same ID already exists.";
pub const ITEM_REQUIRED: &str = "Item cannot be null.";
pub const ID_MISMATCH: &str = "ID mismatch.";

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ItemError {
    pub fn not_found() -> Self {
        ItemError::NotFound(ITEM_NOT_FOUND.to_string())
    }

    pub fn already_exists() -> Self {
        ItemError::Conflict(ITEM_ALREADY_EXISTS.to_string())
    }
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(msg) => AppError::NotFound(msg),
            ItemError::Conflict(msg) => AppError::Conflict(msg),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Flattens validator output into one sentence per failed rule, sorted by
/// field so the message is stable.
impl From<ValidationErrors> for ItemError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid ({}).", field, e.code),
                })
            })
            .collect::<Vec<_>>()
            .join(" ");

        ItemError::Validation(message)
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ItemError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}
