use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejection is an [`AppError`], so malformed bodies get the
/// same error shape as every other failure.
///
/// Use `JsonBody<Option<T>>` to let a literal `null` body reach the handler.
///
/// ```ignore
/// async fn create(JsonBody(payload): JsonBody<Option<Item>>) -> Result<..., AppError> { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
