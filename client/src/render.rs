//! Text rendering of the view.
//!
//! Rows are rebuilt from the list on every render; nothing is diffed.

use crate::view::ViewState;
use composable_todo_core::todo::{Todo, TodoId};
use std::fmt::Write as _;

const STRIKE: &str = "\x1b[9m";
const RESET: &str = "\x1b[0m";

/// How completed titles are marked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// ANSI strikethrough
    #[default]
    Terminal,
    /// `~~title~~`, for terminals without ANSI support and for logs
    Plain,
}

/// One displayed row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedTodo {
    /// 1-based position used by commands
    pub position: usize,
    /// Id of the todo behind the row
    pub id: TodoId,
    /// Title as stored
    pub title: String,
    /// Completion flag as stored
    pub done: bool,
}

/// Escape control characters so a title cannot drive the terminal
fn printable(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_control() {
                c.escape_debug().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

impl RenderedTodo {
    /// Format the row as `  1. [x] title`
    #[must_use]
    pub fn line(&self, style: RenderStyle) -> String {
        let checkbox = if self.done { "[x]" } else { "[ ]" };
        let title = printable(&self.title);
        let title = match (self.done, style) {
            (false, _) => title,
            (true, RenderStyle::Terminal) => format!("{STRIKE}{title}{RESET}"),
            (true, RenderStyle::Plain) => format!("~~{title}~~"),
        };
        format!("{:>3}. {checkbox} {title}", self.position)
    }
}

/// Build display rows in list order
#[must_use]
pub fn rows(todos: &[Todo]) -> Vec<RenderedTodo> {
    todos
        .iter()
        .enumerate()
        .map(|(index, todo)| RenderedTodo {
            position: index + 1,
            id: todo.id.clone(),
            title: todo.title.clone(),
            done: todo.done,
        })
        .collect()
}

/// Find the row shown at a 1-based `position`
#[must_use]
pub fn row_at(todos: &[Todo], position: usize) -> Option<RenderedTodo> {
    rows(todos).into_iter().find(|row| row.position == position)
}

/// Render the whole view
#[must_use]
pub fn render(state: &ViewState, style: RenderStyle) -> String {
    let mut out = String::new();

    if state.todos.is_empty() {
        out.push_str("  (no todos)\n");
    }
    for row in rows(&state.todos) {
        out.push_str(&row.line(style));
        out.push('\n');
    }
    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "  ! {error}");
    }

    out
}
