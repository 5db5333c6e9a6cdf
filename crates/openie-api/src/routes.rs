//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the service router
///
/// There is one logical endpoint: every path is handled by the dispatcher,
/// which only looks at the method and the query string.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .fallback(handlers::dispatch)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
