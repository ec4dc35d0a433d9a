// InfluxDB repository implementation
use crate::application::traffic_repository::{RecordedCount, TrafficRepository};
use crate::infrastructure::connection_pool::{InfluxPool, InfluxQLResponse};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InfluxTrafficRepository {
    pool: Arc<InfluxPool>,
    measurement: String,
}

impl InfluxTrafficRepository {
    pub fn new(pool: Arc<InfluxPool>, measurement: String) -> Self {
        Self { pool, measurement }
    }

    fn latest_counts_query(&self) -> String {
        // "value" is quoted so it is never read as a keyword
        format!(
            "SELECT last(\"value\") AS value FROM \"{}\" GROUP BY \"label\"",
            self.measurement
        )
    }

    fn parse_latest_counts(response: &InfluxQLResponse) -> Vec<RecordedCount> {
        let mut counts = Vec::new();

        if let Some(result) = response.results.first() {
            if let Some(series_list) = &result.series {
                for series in series_list {
                    let label = match series.tags.as_ref().and_then(|t| t.get("label")) {
                        Some(label) => label.clone(),
                        None => continue,
                    };
                    let value_idx = series
                        .columns
                        .iter()
                        .position(|c| c == "value" || c == "last")
                        .unwrap_or(1);

                    let value = series
                        .values
                        .first()
                        .and_then(|row| row.get(value_idx))
                        .and_then(|v| v.as_f64());

                    if let Some(value) = value {
                        counts.push(RecordedCount { label, value });
                    }
                }
            }
        }

        counts
    }
}

#[async_trait]
impl TrafficRepository for InfluxTrafficRepository {
    async fn connect(&self) -> Result<()> {
        self.pool.acquire().await?;
        Ok(())
    }

    async fn latest_counts(&self) -> Result<Vec<RecordedCount>> {
        let connection = self.pool.acquire().await?;
        let query = self.latest_counts_query();

        tracing::debug!("Executing latest counts query: {}", query);
        let response = connection.query(&query).await?;

        let counts = Self::parse_latest_counts(&response);
        tracing::debug!("Found {} recorded labels", counts.len());
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::DatabaseSettings;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn settings(host: String) -> DatabaseSettings {
        DatabaseSettings {
            host,
            token: Some("secret".to_string()),
            database: "traffic".to_string(),
            retention_policy: "autogen".to_string(),
            measurement: "traffic_stat".to_string(),
            timeout_secs: 5,
        }
    }

    fn sample_response() -> serde_json::Value {
        json!({
            "results": [{
                "statement_id": 0,
                "series": [
                    {
                        "name": "traffic_stat",
                        "tags": {"label": "Cars"},
                        "columns": ["time", "value"],
                        "values": [["1970-01-01T00:00:00Z", 37.0]]
                    },
                    {
                        "name": "traffic_stat",
                        "tags": {"label": "Bikes"},
                        "columns": ["time", "value"],
                        "values": [["1970-01-01T00:00:00Z", 12]]
                    },
                    {
                        "name": "traffic_stat",
                        "columns": ["time", "value"],
                        "values": [["1970-01-01T00:00:00Z", 5]]
                    }
                ]
            }]
        })
    }

    /// Serve a minimal InfluxDB lookalike and return its base URL.
    async fn spawn_fake_influx(pings: Arc<AtomicUsize>, body: serde_json::Value) -> String {
        let router = Router::new()
            .route(
                "/ping",
                get(move || {
                    let pings = pings.clone();
                    async move {
                        pings.fetch_add(1, Ordering::SeqCst);
                        StatusCode::NO_CONTENT
                    }
                }),
            )
            .route(
                "/query",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let body = body.clone();
                    async move {
                        assert_eq!(params.get("db").map(String::as_str), Some("traffic"));
                        assert!(params.get("q").is_some_and(|q| q.contains("GROUP BY \"label\"")));
                        Json(body)
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_parse_skips_series_without_label() {
        let response: InfluxQLResponse = serde_json::from_value(sample_response()).unwrap();
        let counts = InfluxTrafficRepository::parse_latest_counts(&response);

        assert_eq!(
            counts,
            vec![
                RecordedCount { label: "Cars".to_string(), value: 37.0 },
                RecordedCount { label: "Bikes".to_string(), value: 12.0 },
            ]
        );
    }

    #[test]
    fn test_parse_empty_result() {
        let response: InfluxQLResponse =
            serde_json::from_value(json!({"results": [{"statement_id": 0}]})).unwrap();
        assert!(InfluxTrafficRepository::parse_latest_counts(&response).is_empty());
    }

    #[tokio::test]
    async fn test_latest_counts_against_fake_server() {
        let pings = Arc::new(AtomicUsize::new(0));
        let host = spawn_fake_influx(pings.clone(), sample_response()).await;
        let pool = Arc::new(InfluxPool::new(&settings(host)));
        let repository = InfluxTrafficRepository::new(pool.clone(), "traffic_stat".to_string());

        repository.connect().await.unwrap();
        let counts = repository.latest_counts().await.unwrap();

        assert_eq!(counts.len(), 2);
        assert!(pool.is_connected());
        // The pool pings once and reuses the connection.
        assert_eq!(pings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_query_error_is_reported() {
        let pings = Arc::new(AtomicUsize::new(0));
        let body = json!({"results": [{"statement_id": 0, "error": "database not found: traffic"}]});
        let host = spawn_fake_influx(pings, body).await;
        let pool = Arc::new(InfluxPool::new(&settings(host)));
        let repository = InfluxTrafficRepository::new(pool, "traffic_stat".to_string());

        let err = repository.latest_counts().await.unwrap_err();
        assert!(err.to_string().contains("database not found"));
    }
}
