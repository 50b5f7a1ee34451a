use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::stats::Collector;

use super::handlers::{get_metrics, get_stats, health_check, AppState};

/// Maximum time spent answering a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub fn create_router(collector: Collector) -> Router {
    let state = Arc::new(AppState { collector });

    let router = Router::new()
        .route("/", get(get_stats))
        .route("/metrics", get(get_metrics))
        .route("/health", get(health_check))
        .with_state(state);

    with_middleware(router, REQUEST_TIMEOUT)
}

/// Request logging, and `408 Request Timeout` for requests running longer
/// than `timeout`
pub fn with_middleware(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
