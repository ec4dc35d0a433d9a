// Lazily established, shared connection to the InfluxDB HTTP API
use crate::infrastructure::config::DatabaseSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct InfluxQLResponse {
    pub results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
pub struct InfluxQLResult {
    #[serde(default)]
    pub series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InfluxQLSeries {
    #[allow(dead_code)]
    pub name: String,
    pub columns: Vec<String>,
    pub values: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    pub tags: Option<std::collections::HashMap<String, String>>,
}

/// Owns the connection cache. `acquire` pings the server once and reuses
/// the client afterwards; a failed attempt is not cached, so the next call
/// tries again.
#[derive(Debug)]
pub struct InfluxPool {
    host: String,
    token: Option<String>,
    database: String,
    retention_policy: String,
    timeout: Duration,
    client: OnceCell<reqwest::Client>,
}

#[derive(Debug, Clone)]
pub struct InfluxConnection<'a> {
    pool: &'a InfluxPool,
    client: reqwest::Client,
}

impl InfluxPool {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            database: settings.database.clone(),
            retention_policy: settings.retention_policy.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            client: OnceCell::new(),
        }
    }

    #[cfg(test)]
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    pub async fn acquire(&self) -> Result<InfluxConnection<'_>> {
        let client = self
            .client
            .get_or_try_init(|| self.connect())
            .await
            .inspect_err(|e| tracing::error!("Database connection error: {:#}", e))?;

        Ok(InfluxConnection {
            pool: self,
            client: client.clone(),
        })
    }

    async fn connect(&self) -> Result<reqwest::Client> {
        tracing::info!("Connecting to database at {}", self.host);

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let response = self
            .authorize(client.get(format!("{}/ping", self.host)))
            .send()
            .await
            .context("Failed to reach InfluxDB")?;

        if !response.status().is_success() {
            anyhow::bail!("InfluxDB ping failed with status {}", response.status());
        }

        Ok(client)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Token {}", token)),
            None => request,
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }
}

impl InfluxConnection<'_> {
    pub async fn query(&self, query: &str) -> Result<InfluxQLResponse> {
        let url = self.pool.build_query_url(query);

        let response = self
            .pool
            .authorize(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .context("Failed to parse InfluxDB response")?;

        if let Some(result) = data.results.first() {
            if let Some(error) = &result.error {
                anyhow::bail!("InfluxDB query error: {}", error);
            }
        }

        Ok(data)
    }
}
