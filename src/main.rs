// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use crate::application::stats_service::StatsService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::connection_pool::InfluxPool;
use crate::infrastructure::influx_repository::InfluxTrafficRepository;
use crate::infrastructure::logging::init_tracing;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_config()?;

    // Initialize tracing
    init_tracing(config.log_file.as_deref())?;

    // Create service (application layer), backed by the store unless mock data is on
    let stats_service = match config.store_settings()? {
        None => StatsService::mock(),
        Some(database) => {
            let pool = Arc::new(InfluxPool::new(database));
            let repository =
                Arc::new(InfluxTrafficRepository::new(pool, database.measurement.clone()));
            StatsService::with_repository(repository, config.fallback_to_mock)
        }
    };

    tracing::info!("Serving stats (mock: {})", stats_service.is_mock());

    // Create application state
    let state = Arc::new(AppState { stats_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.listen_address.parse()?;
    tracing::info!("Starting traffic-stats service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
