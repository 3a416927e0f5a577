//! Custom Axum extractors.
//!
//! - `ApiJson`: JSON body whose rejections render as [`AppError`] bodies
//!
//! # Examples
//!
//! ```ignore
//! use composable_todo_web::extractors::ApiJson;
//!
//! async fn handler(ApiJson(patch): ApiJson<TodoPatch>) -> Result<Json<Todo>, AppError> {
//!     // a malformed body never reaches this point
//! }
//! ```

use crate::error::AppError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON request body.
///
/// Wraps [`axum::Json`] so that a body that is not valid JSON, or does not
/// fit `T`, is answered with a `400 BAD_REQUEST` in the same error shape as
/// every other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(AppError::bad_request(rejection.body_text()))
            },
        }
    }
}
