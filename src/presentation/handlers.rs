// HTTP request handlers
use crate::domain::time_range::TimeRange;
use crate::domain::traffic::{DashboardResponse, PieSlice};
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct StatsQuery {
    pub range: Option<String>,
    pub from: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Pie and line chart data for the requested range. A missing range means
/// the last hour; an unknown one gets the default density.
pub async fn get_stats(
    Query(query): Query<StatsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let range = query
        .range
        .as_deref()
        .map(TimeRange::from_token)
        .unwrap_or_default();

    if range == TimeRange::Other {
        tracing::debug!(
            "Unrecognized range {:?}, using default density",
            query.range.as_deref().unwrap_or_default()
        );
    }

    let anchor = query.from.as_deref().map(parse_anchor).transpose()?;
    let stats = state.stats_service.get_stats(range, anchor).await?;
    Ok(Json(stats))
}

/// Latest recorded counts, pie chart only
pub async fn get_stats_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PieSlice>>, ApiError> {
    let snapshot = state.stats_service.recorded_snapshot().await?;
    Ok(Json(snapshot))
}

fn parse_anchor(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ApiError::BadRequest("Invalid 'from' timestamp"))
}
