//! In-memory document store for fast, deterministic tests
//!
//! [`InMemoryTodoStore`] keeps records in insertion order behind a lock and
//! follows the same merge and delete rules as the `PostgreSQL` backend.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use composable_todo_core::todo::{NewTodo, Todo, TodoId, TodoPatch};
use composable_todo_core::todo_store::{StoreFuture, TodoStore, TodoStoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory todo store.
///
/// Cloning shares the underlying records, so a test can keep a handle while
/// the service owns another.
///
/// # Example
///
/// ```
/// use composable_todo_testing::InMemoryTodoStore;
/// use composable_todo_core::todo::NewTodo;
/// use composable_todo_core::todo_store::TodoStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
/// let todo = store.create(NewTodo::new("Buy milk")?).await?;
///
/// assert!(!todo.done);
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTodoStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `todos`, kept in the given order
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail with `Unavailable` (or recover)
    ///
    /// Simulates a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.read().unwrap().len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.read().unwrap().is_empty()
    }

    /// Remove every todo (for test isolation)
    pub fn clear(&self) {
        self.todos.write().unwrap().clear();
    }

    /// Snapshot of the stored todos, without going through the async API
    #[must_use]
    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos.read().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), TodoStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TodoStoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl TodoStore for InMemoryTodoStore {
    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            self.check_available()?;
            Ok(self.todos.read().unwrap().clone())
        })
    }

    fn create(&self, new_todo: NewTodo) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            self.check_available()?;
            let todo = new_todo.into_todo(TodoId::generate());
            self.todos.write().unwrap().push(todo.clone());
            Ok(todo)
        })
    }

    fn update(&self, id: TodoId, patch: TodoPatch) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            self.check_available()?;
            let mut todos = self.todos.write().unwrap();
            let todo = todos
                .iter_mut()
                .find(|todo| todo.id == id)
                .ok_or(TodoStoreError::NotFound(id))?;
            patch.apply_to(todo);
            Ok(todo.clone())
        })
    }

    fn delete(&self, id: TodoId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.check_available()?;
            self.todos.write().unwrap().retain(|todo| todo.id != id);
            Ok(())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.check_available() })
    }
}
