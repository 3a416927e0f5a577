//! `todo`: terminal client for the todo store service.

use anyhow::Context;
use clap::Parser;
use composable_todo_client::api::{DEFAULT_API_URL, HttpTodoApi};
use composable_todo_client::command::{Command, CommandError, HELP};
use composable_todo_client::render::{RenderStyle, render, row_at};
use composable_todo_client::view::ViewAction;
use composable_todo_client::{ViewStore, dispatch, view_store};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "todo> ";

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage the todo list from the terminal")]
struct Cli {
    /// URL of the `/todos` collection
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Mark done todos with ~~title~~ instead of ANSI strikethrough
    #[arg(long, default_value_t = false)]
    plain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let style = if cli.plain {
        RenderStyle::Plain
    } else {
        RenderStyle::Terminal
    };

    let store = view_store(Arc::new(HttpTodoApi::new(cli.api_url)));
    let mut editor = DefaultEditor::new().context("Failed to initialise the line editor")?;

    dispatch(&store, ViewAction::Load).await?;
    show(&store, style).await;

    loop {
        let line = match tokio::task::block_in_place(|| editor.readline(PROMPT)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error).context("Failed to read input"),
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };
        let _ = editor.add_history_entry(line.as_str());

        let actions = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            },
            Command::List => vec![ViewAction::Load],
            Command::Add(title) => vec![ViewAction::DraftChanged { text: title }, ViewAction::Add],
            Command::Toggle(position) => {
                let Some(row) = lookup(&store, position).await else {
                    continue;
                };
                vec![ViewAction::Toggle {
                    id: row.id,
                    done: !row.done,
                }]
            },
            Command::Edit(position) => {
                let Some(row) = lookup(&store, position).await else {
                    continue;
                };
                let new_title = match tokio::task::block_in_place(|| {
                    editor.readline_with_initial("Edit todo: ", (row.title.as_str(), ""))
                }) {
                    Ok(title) => Some(title),
                    Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
                    Err(error) => return Err(error).context("Failed to read input"),
                };
                vec![ViewAction::Edit {
                    id: row.id,
                    new_title,
                }]
            },
            Command::Delete(position) => {
                let Some(row) = lookup(&store, position).await else {
                    continue;
                };
                vec![ViewAction::Delete { id: row.id }]
            },
        };

        for action in actions {
            dispatch(&store, action).await?;
        }
        show(&store, style).await;
    }

    store
        .shutdown(Duration::from_secs(5))
        .await
        .context("Pending requests did not finish")?;
    Ok(())
}

async fn lookup(
    store: &ViewStore,
    position: usize,
) -> Option<composable_todo_client::render::RenderedTodo> {
    let row = store.state(|s| row_at(&s.todos, position)).await;
    if row.is_none() {
        println!("no todo number {position}");
    }
    row
}

async fn show(store: &ViewStore, style: RenderStyle) {
    let text = store.state(|s| render(s, style)).await;
    print!("{text}");
}
