//! Todo collection endpoints.
//!
//! Each handler translates one request into exactly one store call.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use composable_todo_core::todo::{Acknowledgement, NewTodo, Todo, TodoId, TodoPatch};
use serde::Deserialize;

/// Body of `POST /todos`.
///
/// `title` is optional at the parsing level so that a missing or `null`
/// title is reported as a validation failure rather than a malformed body.
/// Other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Title of the new todo
    #[serde(default)]
    pub title: Option<String>,
}

/// List every todo.
///
/// # Endpoint
///
/// ```text
/// GET /todos
/// ```
///
/// # Errors
///
/// 500 if the store fails.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.store.list().await?;
    tracing::debug!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

/// Create a todo with `done = false`.
///
/// # Endpoint
///
/// ```text
/// POST /todos
/// {"title": "Buy milk"}
/// ```
///
/// # Errors
///
/// - 400 if the body is not valid JSON
/// - 422 if `title` is missing, `null` or blank
/// - 500 if the store fails
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let title = request
        .title
        .ok_or_else(|| AppError::validation("Todo title is required"))?;
    let new_todo = NewTodo::new(title)?;

    let todo = state.store.create(new_todo).await?;

    metrics::counter!("todos.mutations.total", "operation" => "create").increment(1);
    tracing::debug!(id = %todo.id, "Created todo");
    Ok(Json(todo))
}

/// Merge the supplied fields into an existing todo.
///
/// # Endpoint
///
/// ```text
/// PUT /todos/:id
/// {"done": true}
/// ```
///
/// # Errors
///
/// - 400 if the body is not valid JSON
/// - 404 if no todo has this id
/// - 422 if a blank `title` is supplied
/// - 500 if the store fails
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<TodoPatch>,
) -> Result<Json<Todo>, AppError> {
    patch.validate()?;

    let todo = state.store.update(TodoId::from(id), patch).await?;

    metrics::counter!("todos.mutations.total", "operation" => "update").increment(1);
    tracing::debug!(id = %todo.id, done = todo.done, "Updated todo");
    Ok(Json(todo))
}

/// Delete a todo. Deleting an unknown id still succeeds.
///
/// # Endpoint
///
/// ```text
/// DELETE /todos/:id
/// ```
///
/// # Errors
///
/// 500 if the store fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Acknowledgement>, AppError> {
    let id = TodoId::from(id);
    state.store.delete(id.clone()).await?;

    metrics::counter!("todos.mutations.total", "operation" => "delete").increment(1);
    tracing::debug!(id = %id, "Deleted todo");
    Ok(Json(Acknowledgement::deleted()))
}
