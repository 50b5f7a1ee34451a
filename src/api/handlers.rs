use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::metrics;
use crate::stats::{by_country, Collector};

pub struct AppState {
    pub collector: Collector,
}

/// Listener totals grouped by country and city, as indented JSON
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.collector.snapshot().await;
    let stats = by_country(&snapshot);

    match serde_json::to_string_pretty(&stats) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize stats: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize stats").into_response()
        }
    }
}

/// Prometheus scrape endpoint
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.collector.snapshot().await;

    match metrics::render(&snapshot) {
        Ok(body) => (
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    #[derive(Serialize)]
    struct HealthResponse {
        status: String,
    }

    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
