//! The client view against a live in-process store service.
//!
//! The service runs on an ephemeral port backed by `InMemoryTodoStore`; the
//! view talks to it over real HTTP through `HttpTodoApi`.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use composable_todo_client::api::HttpTodoApi;
use composable_todo_client::render::{RenderStyle, render, row_at};
use composable_todo_client::view::ViewAction;
use composable_todo_client::{ViewStore, dispatch, view_store};
use composable_todo_testing::InMemoryTodoStore;
use composable_todo_web::config::CorsConfig;
use composable_todo_web::{AppState, build_router};
use std::sync::Arc;

async fn spawn_service(store: InMemoryTodoStore) -> String {
    let app = build_router(AppState::from_store(store), &CorsConfig::AnyOrigin);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{addr}/todos")
}

async fn connected_view(store: InMemoryTodoStore) -> ViewStore {
    let url = spawn_service(store).await;
    view_store(Arc::new(HttpTodoApi::new(url)))
}

async fn send(view: &ViewStore, action: ViewAction) {
    dispatch(view, action).await.expect("Store rejected action");
}

#[tokio::test]
async fn full_session() {
    let backend = InMemoryTodoStore::new();
    let view = connected_view(backend.clone()).await;

    send(&view, ViewAction::Load).await;
    assert!(view.state(|s| s.todos.is_empty()).await);

    for title in ["Buy milk", "Walk dog"] {
        send(
            &view,
            ViewAction::DraftChanged {
                text: title.to_string(),
            },
        )
        .await;
        send(&view, ViewAction::Add).await;
    }
    assert_eq!(backend.len(), 2);

    let walk = view.state(|s| row_at(&s.todos, 2)).await.unwrap();
    send(
        &view,
        ViewAction::Toggle {
            id: walk.id.clone(),
            done: !walk.done,
        },
    )
    .await;

    let milk = view.state(|s| row_at(&s.todos, 1)).await.unwrap();
    send(
        &view,
        ViewAction::Edit {
            id: milk.id.clone(),
            new_title: Some("Buy oat milk".to_string()),
        },
    )
    .await;

    let text = view.state(|s| render(s, RenderStyle::Plain)).await;
    assert_eq!(text, "  1. [ ] Buy oat milk\n  2. [x] ~~Walk dog~~\n");

    send(&view, ViewAction::Delete { id: milk.id }).await;
    let text = view.state(|s| render(s, RenderStyle::Plain)).await;
    assert_eq!(text, "  1. [x] ~~Walk dog~~\n");

    let stored = backend.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Walk dog");
    assert!(stored[0].done);
}

#[tokio::test]
async fn blank_add_never_reaches_the_service() {
    let backend = InMemoryTodoStore::new();
    let view = connected_view(backend.clone()).await;

    send(
        &view,
        ViewAction::DraftChanged {
            text: "   ".to_string(),
        },
    )
    .await;
    send(&view, ViewAction::Add).await;

    assert!(backend.is_empty());
    assert_eq!(view.state(|s| s.draft.clone()).await, "   ");
}

#[tokio::test]
async fn service_failure_keeps_rendered_list() {
    let backend = InMemoryTodoStore::new();
    let view = connected_view(backend.clone()).await;
    send(
        &view,
        ViewAction::DraftChanged {
            text: "Buy milk".to_string(),
        },
    )
    .await;
    send(&view, ViewAction::Add).await;

    backend.set_unavailable(true);
    send(&view, ViewAction::Load).await;

    let state = view.state(Clone::clone).await;
    assert_eq!(state.todos.len(), 1);
    assert!(
        state
            .last_error
            .as_deref()
            .is_some_and(|error| error.contains("500"))
    );
}

#[tokio::test]
async fn unreachable_service_is_reported() {
    let view = view_store(Arc::new(HttpTodoApi::new("http://127.0.0.1:9/todos")));

    send(&view, ViewAction::Load).await;

    let state = view.state(Clone::clone).await;
    assert!(state.todos.is_empty());
    assert!(state.last_error.is_some());
}

#[tokio::test]
async fn shutdown_rejects_further_actions() {
    let view = connected_view(InMemoryTodoStore::new()).await;
    send(&view, ViewAction::Load).await;

    view.shutdown(std::time::Duration::from_secs(1))
        .await
        .expect("No effects should be pending");

    assert!(dispatch(&view, ViewAction::Load).await.is_err());
}
