use crate::error::{FlowboardError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr `tracing` subscriber filtered by `filter`.
///
/// An empty filter defers to `RUST_LOG`. Calling this again once a global
/// subscriber exists is a no-op.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = if filter.trim().is_empty() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter)
            .map_err(|e| FlowboardError::ConfigError(format!("Invalid log filter: {}", e)))?
    };

    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter, "tracing initialized");
    }
    Ok(())
}
