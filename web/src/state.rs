//! Application state for Axum handlers.

use composable_todo_core::todo_store::TodoStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// The service keeps no state of its own beyond the handle to the document
/// store; the backend is chosen when the state is built.
///
/// # Examples
///
/// ```ignore
/// let store = PostgresTodoStore::connect(&config.database).await?;
/// let state = AppState::from_store(store);
/// let app = build_router(state, &config.cors);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// The document store every request is translated into
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    /// Create a new application state around a shared store.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Create a new application state taking ownership of `store`.
    #[must_use]
    pub fn from_store<T>(store: T) -> Self
    where
        T: TodoStore + 'static,
    {
        Self::new(Arc::new(store))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
