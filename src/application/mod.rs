// Application layer - Use cases over the domain and the store
pub mod series_synthesizer;
pub mod snapshot;
pub mod stats_service;
pub mod traffic_repository;
