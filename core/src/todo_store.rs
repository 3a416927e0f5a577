//! Document store abstraction for Todo records.
//!
//! The store service owns no state of its own: every request is translated
//! into one call on a [`TodoStore`]. The store is the single shared mutable
//! resource, and each call touches at most one record.
//!
//! # Implementations
//!
//! - `PostgresTodoStore` (in `composable-todo-postgres`): JSONB documents in `PostgreSQL`
//! - `InMemoryTodoStore` (in `composable-todo-testing`): fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use composable_todo_core::todo::{NewTodo, TodoPatch};
//! use composable_todo_core::todo_store::{TodoStore, TodoStoreError};
//!
//! async fn example(store: &dyn TodoStore) -> Result<(), Box<dyn std::error::Error>> {
//!     let todo = store.create(NewTodo::new("Buy milk")?).await?;
//!     let todo = store.update(todo.id, TodoPatch::done(true)).await?;
//!     store.delete(todo.id).await?;
//!     Ok(())
//! }
//! ```

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Error, Debug)]
pub enum TodoStoreError {
    /// No record with this id exists.
    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    /// The store could not be reached or the operation failed inside it.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Boxed future returned by [`TodoStore`] operations
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TodoStoreError>> + Send + 'a>>;

/// Persistence for the flat collection of todos.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] instead of using `async fn` so the service
/// can hold the store as `Arc<dyn TodoStore>` and pick the backend at startup.
///
/// # Merge Rule
///
/// [`TodoStore::update`] must merge the patch field by field with
/// [`TodoPatch::apply_to`]; it must not replace the record.
pub trait TodoStore: Send + Sync {
    /// Load every todo, in insertion order.
    ///
    /// An empty store yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: store connection or query failed
    /// - `Serialization`: a stored document could not be decoded
    fn list(&self) -> StoreFuture<'_, Vec<Todo>>;

    /// Insert a new todo with a freshly generated id and `done = false`.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: store connection or query failed
    fn create(&self, new_todo: NewTodo) -> StoreFuture<'_, Todo>;

    /// Merge `patch` into the todo with `id` and return the merged record.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no todo with `id` exists
    /// - `Unavailable`: store connection or query failed
    fn update(&self, id: TodoId, patch: TodoPatch) -> StoreFuture<'_, Todo>;

    /// Remove the todo with `id`. Removing an absent id succeeds.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: store connection or query failed
    fn delete(&self, id: TodoId) -> StoreFuture<'_, ()>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// - `Unavailable`: the store cannot serve requests
    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
