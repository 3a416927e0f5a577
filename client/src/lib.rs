//! # Composable Todo Client
//!
//! Terminal view of the todo list, built on the reducer runtime:
//!
//! - [`api`]: `TodoApi` seam and its `reqwest` implementation
//! - [`view`]: `ViewReducer`, the view's state machine
//! - [`render`]: rows and text output
//! - [`command`]: prompt input parsing
//!
//! ## Example
//!
//! ```no_run
//! use composable_todo_client::{api::HttpTodoApi, dispatch, view::ViewAction, view_store};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = view_store(Arc::new(HttpTodoApi::default()));
//! dispatch(&store, ViewAction::Load).await?;
//!
//! let count = store.state(|s| s.todos.len()).await;
//! println!("{count} todos");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod command;
pub mod render;
pub mod view;

use api::TodoApi;
use composable_todo_runtime::{Store, StoreError};
use std::sync::Arc;
use view::{ViewAction, ViewEnvironment, ViewReducer, ViewState};

/// The runtime store driving the view
pub type ViewStore = Store<ViewState, ViewAction, ViewEnvironment, ViewReducer>;

/// Build a view store with an empty state around `api`
#[must_use]
pub fn view_store(api: Arc<dyn TodoApi>) -> ViewStore {
    Store::new(ViewState::new(), ViewReducer::new(), ViewEnvironment::new(api))
}

/// Send `action` and wait until every effect it started has finished,
/// including the reload that follows a mutation.
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
pub async fn dispatch(store: &ViewStore, action: ViewAction) -> Result<(), StoreError> {
    let mut handle = store.send(action).await?;
    handle.wait().await;
    Ok(())
}
