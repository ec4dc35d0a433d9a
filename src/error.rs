// Service error taxonomy
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream store error: {0:#}")]
    Upstream(#[from] anyhow::Error),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}
