// Repository trait for recorded traffic data
use async_trait::async_trait;

/// Latest stored count for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCount {
    pub label: String,
    pub value: f64,
}

#[async_trait]
pub trait TrafficRepository: Send + Sync {
    /// Make sure a connection to the store is available. Idempotent.
    async fn connect(&self) -> anyhow::Result<()>;

    /// Latest recorded value per label
    async fn latest_counts(&self) -> anyhow::Result<Vec<RecordedCount>>;
}
