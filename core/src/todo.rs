//! The Todo data model.
//!
//! A todo list is a flat, unordered collection of records with a title and a
//! completion flag. Records are created with `done = false`, mutated in place
//! by merging a [`TodoPatch`], and deleted outright.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier for a todo, assigned by the store on creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh identifier (UUIDv4, 32 lowercase hex characters)
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, immutable after creation
    pub id: TodoId,
    /// Title of the todo
    pub title: String,
    /// Whether the todo is done
    pub done: bool,
}

impl Todo {
    /// Creates a todo that is not done yet
    #[must_use]
    pub const fn new(id: TodoId, title: String) -> Self {
        Self {
            id,
            title,
            done: false,
        }
    }
}

/// Errors raised when a title fails the presence check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title was empty or whitespace only
    #[error("Todo title cannot be empty")]
    EmptyTitle,
}

fn check_title(title: &str) -> Result<(), TodoValidationError> {
    if title.trim().is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(())
}

/// Input for creating a todo
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    title: String,
}

impl NewTodo {
    /// Validates the title and builds the creation input
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::EmptyTitle`] if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        let title = title.into();
        check_title(&title)?;
        Ok(Self { title })
    }

    /// The validated title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Materializes the record under the given id with `done = false`
    #[must_use]
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo::new(id, self.title)
    }
}

/// A partial record: only the fields that are `Some` are written
///
/// Updates are merges, never replacements. Supplying only `done` leaves the
/// title untouched and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// Replacement title, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement completion flag, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TodoPatch {
    /// A patch that only replaces the title
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            done: None,
        }
    }

    /// A patch that only sets the completion flag
    #[must_use]
    pub const fn done(done: bool) -> Self {
        Self {
            title: None,
            done: Some(done),
        }
    }

    /// Returns `true` if the patch carries no field
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }

    /// Checks a supplied title against the same presence rule as creation
    ///
    /// # Errors
    ///
    /// Returns [`TodoValidationError::EmptyTitle`] if a blank title is supplied.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        match &self.title {
            Some(title) => check_title(title),
            None => Ok(()),
        }
    }

    /// Merges the supplied fields into `todo`, field by field
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title.clone_from(title);
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
    }
}

/// Acknowledgement returned by a delete
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Human-readable confirmation
    pub message: String,
}

impl Acknowledgement {
    /// The acknowledgement sent after a delete
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: "Deleted".to_string(),
        }
    }
}
