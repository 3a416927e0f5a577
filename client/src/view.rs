//! The client view as a reducer.
//!
//! The view holds the last successfully rendered list and the text being
//! typed. User intents become [`ViewAction`]s; every successful mutation is
//! followed by a full reload, never by a local patch of the list.
//!
//! # Reload ordering
//!
//! Each reload is stamped with a generation number when it is requested. A
//! reload result is applied only if its generation is newer than the one on
//! screen, so a slow response to an earlier reload can never overwrite a
//! newer list.

use crate::api::TodoApi;
use composable_todo_core::effect::Effect;
use composable_todo_core::reducer::Reducer;
use composable_todo_core::todo::{NewTodo, Todo, TodoId, TodoPatch};
use composable_todo_core::{SmallVec, smallvec};
use std::sync::Arc;

/// State of the client view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// The list as last rendered from a successful load
    pub todos: Vec<Todo>,
    /// Text in the "new todo" input
    pub draft: String,
    /// Generation of the most recently requested load
    pub requested_generation: u64,
    /// Generation of the load currently on screen
    pub rendered_generation: u64,
    /// Description of the last failed round trip, cleared by the next successful load
    pub last_error: Option<String>,
}

impl ViewState {
    /// Empty view, nothing loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a requested load has not been rendered
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.requested_generation > self.rendered_generation
    }
}

/// Everything that can happen to the view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// Fetch the full list
    Load,
    /// A load finished
    Loaded {
        /// Generation stamped when the load was requested
        generation: u64,
        /// The fetched list
        todos: Vec<Todo>,
    },
    /// A load failed
    LoadFailed {
        /// Generation stamped when the load was requested
        generation: u64,
        /// What went wrong
        error: String,
    },
    /// The "new todo" input changed
    DraftChanged {
        /// New input text
        text: String,
    },
    /// Submit the draft as a new todo
    Add,
    /// The service created a todo
    Added {
        /// The created record
        todo: Todo,
    },
    /// Set the completion flag of a todo
    Toggle {
        /// Target todo
        id: TodoId,
        /// New completion flag
        done: bool,
    },
    /// Replace the title of a todo; `None` means the prompt was cancelled
    Edit {
        /// Target todo
        id: TodoId,
        /// Title entered by the user
        new_title: Option<String>,
    },
    /// Delete a todo
    Delete {
        /// Target todo
        id: TodoId,
    },
    /// A toggle, edit or delete succeeded
    Mutated,
    /// A create, toggle, edit or delete failed
    MutationFailed {
        /// What went wrong
        error: String,
    },
}

/// Dependencies of the view reducer
#[derive(Clone)]
pub struct ViewEnvironment {
    /// Store service access
    pub api: Arc<dyn TodoApi>,
}

impl ViewEnvironment {
    /// Wrap an API implementation
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self { api }
    }
}

/// Reducer for [`ViewState`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewReducer;

impl ViewReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Stamp a new generation and describe the fetch
fn reload(state: &mut ViewState, env: &ViewEnvironment) -> Effect<ViewAction> {
    state.requested_generation += 1;
    let generation = state.requested_generation;
    let api = Arc::clone(&env.api);

    Effect::future(async move {
        match api.list().await {
            Ok(todos) => Some(ViewAction::Loaded { generation, todos }),
            Err(error) => Some(ViewAction::LoadFailed {
                generation,
                error: error.to_string(),
            }),
        }
    })
}

fn mutation<F>(fut: F) -> Effect<ViewAction>
where
    F: std::future::Future<Output = Result<(), crate::api::ApiError>> + Send + 'static,
{
    Effect::future(async move {
        match fut.await {
            Ok(()) => Some(ViewAction::Mutated),
            Err(error) => Some(ViewAction::MutationFailed {
                error: error.to_string(),
            }),
        }
    })
}

impl Reducer for ViewReducer {
    type State = ViewState;
    type Action = ViewAction;
    type Environment = ViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ViewAction::Load => smallvec![reload(state, env)],

            ViewAction::Loaded { generation, todos } => {
                if generation <= state.rendered_generation {
                    tracing::debug!(
                        generation,
                        rendered = state.rendered_generation,
                        "Discarding stale load"
                    );
                    return SmallVec::new();
                }
                state.todos = todos;
                state.rendered_generation = generation;
                state.last_error = None;
                SmallVec::new()
            },

            ViewAction::LoadFailed { generation, error } => {
                if generation <= state.rendered_generation {
                    tracing::debug!(
                        generation,
                        rendered = state.rendered_generation,
                        %error,
                        "Discarding stale load failure"
                    );
                    return SmallVec::new();
                }
                tracing::warn!(generation, %error, "Failed to load todos");
                state.last_error = Some(error);
                SmallVec::new()
            },

            ViewAction::DraftChanged { text } => {
                state.draft = text;
                SmallVec::new()
            },

            ViewAction::Add => {
                let Ok(new_todo) = NewTodo::new(state.draft.clone()) else {
                    return SmallVec::new();
                };
                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.create(new_todo).await {
                        Ok(todo) => Some(ViewAction::Added { todo }),
                        Err(error) => Some(ViewAction::MutationFailed {
                            error: error.to_string(),
                        }),
                    }
                })]
            },

            ViewAction::Added { todo } => {
                tracing::debug!(id = %todo.id, "Todo added");
                state.draft.clear();
                smallvec![reload(state, env)]
            },

            ViewAction::Toggle { id, done } => {
                let api = Arc::clone(&env.api);
                smallvec![mutation(async move {
                    api.update(id, TodoPatch::done(done)).await.map(|_| ())
                })]
            },

            ViewAction::Edit { id, new_title } => {
                let Some(patch) = new_title
                    .map(TodoPatch::title)
                    .filter(|patch| patch.validate().is_ok())
                else {
                    return SmallVec::new();
                };
                let api = Arc::clone(&env.api);
                smallvec![mutation(async move { api.update(id, patch).await.map(|_| ()) })]
            },

            ViewAction::Delete { id } => {
                let api = Arc::clone(&env.api);
                smallvec![mutation(async move { api.delete(id).await.map(|_| ()) })]
            },

            ViewAction::Mutated => smallvec![reload(state, env)],

            ViewAction::MutationFailed { error } => {
                tracing::warn!(%error, "Todo mutation failed");
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
