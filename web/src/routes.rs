//! Router configuration for the store service.

use crate::config::CorsConfig;
use crate::handlers::{
    create_todo, delete_todo, health_check, list_todos, readiness_check, update_todo,
};
use crate::middleware::request_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Configures:
/// - `GET /todos`, `POST /todos`
/// - `PUT /todos/:id`, `DELETE /todos/:id`
/// - `GET /health`, `GET /health/ready`
///
/// wrapped in request id tracking, HTTP tracing and CORS.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .layer(request_id_layer())
        .with_state(state)
}

/// Build the CORS layer for `config`.
///
/// Origins that are not valid header values are skipped with a warning.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    match config {
        CorsConfig::AnyOrigin => layer.allow_origin(Any),
        CorsConfig::AllowList(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    },
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        },
    }
}
