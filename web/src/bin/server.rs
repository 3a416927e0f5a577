//! Todo store service HTTP server.
//!
//! Serves the `/todos` collection over a `PostgreSQL` document store.

use anyhow::Context;
use composable_todo_postgres::PostgresTodoStore;
use composable_todo_web::{AppState, Config, build_router};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,composable_todo=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Todo store service");

    let config = Config::from_env();
    info!(
        bind = %config.server.bind_address(),
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    info!("Connecting to document store...");
    let store = PostgresTodoStore::connect(&config.database)
        .await
        .context("Failed to connect to the document store")?;
    store
        .migrate()
        .await
        .context("Failed to migrate the document store")?;

    let state = AppState::new(Arc::new(store.clone()));
    let app = build_router(state, &config.cors);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    let shutdown = Arc::new(Notify::new());
    let trigger = Arc::clone(&shutdown);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        trigger.notify_one();
    });

    let shutdown_timeout = config.server.shutdown_timeout;
    tokio::select! {
        result = server.into_future() => result.context("Server error")?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "In-flight requests did not finish before the shutdown timeout"
            );
        },
    }

    store.close().await;
    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
