pub mod config;
pub mod error;
pub mod forward;
pub mod handlers;
pub mod headers;
pub mod metrics;
pub mod rate_limit;
pub mod rewrite;
pub mod state;

use axum::Router;
use axum::routing::{any, get};
use state::AppState;
use std::sync::Arc;

// Builds the full router; shared between main and the integration
// tests.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/search", get(handlers::search_handler))
        .route("/proxy", get(handlers::proxy_handler))
        .route("/form-proxy", any(handlers::form_proxy_handler))
        .fallback(handlers::asset_handler)
        .with_state(state)
}
