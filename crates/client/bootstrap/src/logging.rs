//! Tracing subscriber setup for front-ends.
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber.
///
/// `filter` takes precedence over `RUST_LOG`; without either, `info` and
/// above are shown. Fails instead of panicking when a global subscriber is
/// already installed.
pub fn setup_logging(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
