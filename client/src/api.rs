//! HTTP access to the store service.
//!
//! [`TodoApi`] is the seam the view reducer talks through; [`HttpTodoApi`]
//! implements it with `reqwest` against the `/todos` collection.

use composable_todo_core::todo::{Acknowledgement, NewTodo, Todo, TodoId, TodoPatch};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Collection URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/todos";

/// Errors that can occur when talking to the store service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout)
    #[error("Request failed: {0}")]
    Request(String),

    /// The service has no todo with this id
    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    /// The service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// The response body could not be parsed
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

/// Boxed future returned by [`TodoApi`] operations
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Operations the client view performs against the store service.
///
/// Dyn-compatible so the view environment can hold `Arc<dyn TodoApi>` and
/// tests can substitute an in-process implementation.
pub trait TodoApi: Send + Sync {
    /// Fetch every todo.
    fn list(&self) -> ApiFuture<'_, Vec<Todo>>;

    /// Create a todo from a validated title.
    fn create(&self, new_todo: NewTodo) -> ApiFuture<'_, Todo>;

    /// Merge `patch` into the todo with `id`.
    fn update(&self, id: TodoId, patch: TodoPatch) -> ApiFuture<'_, Todo>;

    /// Delete the todo with `id`.
    fn delete(&self, id: TodoId) -> ApiFuture<'_, Acknowledgement>;
}

/// Error body produced by the service
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// `reqwest`-backed [`TodoApi`]
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl Default for HttpTodoApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl HttpTodoApi {
    /// Create a client for the collection at `base_url` (e.g. `http://host:5000/todos`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The collection URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body).map_or(body, |error| error.message);
    ApiError::Status { status, message }
}

async fn decode<T>(response: reqwest::Response) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn request_failed(e: reqwest::Error) -> ApiError {
    ApiError::Request(e.to_string())
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> ApiFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.base_url)
                .send()
                .await
                .map_err(request_failed)?;
            decode(response).await
        })
    }

    fn create(&self, new_todo: NewTodo) -> ApiFuture<'_, Todo> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.base_url)
                .json(&new_todo)
                .send()
                .await
                .map_err(request_failed)?;
            decode(response).await
        })
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> ApiFuture<'_, Todo> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.item_url(&id))
                .json(&patch)
                .send()
                .await
                .map_err(request_failed)?;

            if response.status() == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound(id));
            }
            decode(response).await
        })
    }

    fn delete(&self, id: TodoId) -> ApiFuture<'_, Acknowledgement> {
        Box::pin(async move {
            let response = self
                .client
                .delete(self.item_url(&id))
                .send()
                .await
                .map_err(request_failed)?;
            decode(response).await
        })
    }
}
