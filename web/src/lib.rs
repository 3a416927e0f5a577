//! HTTP store service for Composable Todo.
//!
//! A thin translation layer: every request becomes exactly one call on a
//! [`TodoStore`](composable_todo_core::todo_store::TodoStore), and every
//! store result becomes a JSON response.
//!
//! # Request Flow
//!
//! 1. **Request id** is extracted or generated and attached to a span
//! 2. **Extract data** from the request (path id, JSON body)
//! 3. **Validate** the title presence rule
//! 4. **Call the store** once
//! 5. **Map result** to an HTTP response, or an [`AppError`] body
//!
//! # Example
//!
//! ```ignore
//! use composable_todo_web::{AppState, build_router, config::CorsConfig};
//!
//! let state = AppState::from_store(store);
//! let app = build_router(state, &CorsConfig::AnyOrigin);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use extractors::ApiJson;
pub use middleware::{REQUEST_ID_HEADER, RequestId, request_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
