// Tracing subscriber setup
use anyhow::Context;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the `info` default.
/// With a log file, the file is truncated on startup and receives all output.
pub fn init_tracing(log_file: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt().with_env_filter(env_filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            fmt_layer.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        None => fmt_layer.init(),
    }

    Ok(())
}
