use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_stats, get_stats_snapshot, health_check};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/stats", get(get_stats))
        .route("/api/stats/snapshot", get(get_stats_snapshot))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
