// Stats service - Use case for building the traffic dashboard
use crate::application::series_synthesizer::synthesize;
use crate::application::snapshot::project;
use crate::application::traffic_repository::{RecordedCount, TrafficRepository};
use crate::domain::category::Category;
use crate::domain::time_range::{resolve_density, TimeRange};
use crate::domain::traffic::{DashboardResponse, PieSlice};
use crate::error::StatsError;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

#[derive(Clone)]
enum Backend {
    Mock,
    Store {
        repository: Arc<dyn TrafficRepository>,
        fallback_to_mock: bool,
    },
}

#[derive(Clone)]
pub struct StatsService {
    backend: Backend,
}

impl StatsService {
    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock,
        }
    }

    /// Serve from the store. History aggregation does not exist yet; with
    /// `fallback_to_mock` the synthetic history is served instead of failing.
    pub fn with_repository(repository: Arc<dyn TrafficRepository>, fallback_to_mock: bool) -> Self {
        Self {
            backend: Backend::Store {
                repository,
                fallback_to_mock,
            },
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock)
    }

    pub async fn get_stats(
        &self,
        range: TimeRange,
        anchor: Option<DateTime<Utc>>,
    ) -> Result<DashboardResponse, StatsError> {
        tracing::info!(
            "Fetching stats for range: {} (mock: {})",
            range.as_str(),
            self.is_mock()
        );

        match &self.backend {
            Backend::Mock => Ok(live_mock_dashboard(range, anchor)),
            Backend::Store {
                repository,
                fallback_to_mock,
            } => {
                repository.connect().await?;

                if !fallback_to_mock {
                    return Err(StatsError::NotImplemented("history aggregation from the store"));
                }

                tracing::warn!(
                    "History aggregation is not implemented, serving synthetic data for range {}",
                    range.as_str()
                );
                Ok(live_mock_dashboard(range, anchor))
            }
        }
    }

    /// Latest counts for the pie chart, read straight from the store.
    pub async fn recorded_snapshot(&self) -> Result<Vec<PieSlice>, StatsError> {
        match &self.backend {
            Backend::Mock => {
                tracing::info!("Generating mock pie chart statistics");
                Ok(random_snapshot())
            }
            Backend::Store { repository, .. } => {
                tracing::info!("Fetching recorded pie chart statistics from the store");
                repository.connect().await?;
                let counts = repository.latest_counts().await?;
                Ok(counts.into_iter().map(slice_from_record).collect())
            }
        }
    }
}

/// Synthetic history for `range` with the pie projected from its last point.
pub fn mock_dashboard<R: Rng>(
    range: TimeRange,
    anchor: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DashboardResponse {
    let density = resolve_density(range);
    let history = synthesize(density, anchor, now, rng);
    let pie = project(&history);
    DashboardResponse::new(pie, history)
}

// Keeps the thread-local rng out of async state.
fn live_mock_dashboard(range: TimeRange, anchor: Option<DateTime<Utc>>) -> DashboardResponse {
    mock_dashboard(range, anchor, Utc::now(), &mut rand::thread_rng())
}

fn random_snapshot() -> Vec<PieSlice> {
    let mut rng = rand::thread_rng();
    Category::ALL
        .iter()
        .map(|category| PieSlice::new(category.label(), rng.gen_range(1..=100)))
        .collect()
}

fn slice_from_record(record: RecordedCount) -> PieSlice {
    let value = if record.value.is_finite() {
        record.value.round().max(0.0) as u32
    } else {
        0
    };
    PieSlice::new(record.label, value)
}
