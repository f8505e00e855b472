// =============================================================================
// Quantum State Visualizer - Telemetry
// =============================================================================
// Purpose: Installs the global fmt subscriber. `RUST_LOG` takes precedence
//          over the configured default directive.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn build_env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new(crate::configuration::DEFAULT_LOG_FILTER))
}

/// Fails if a global subscriber is already installed.
pub fn initialize_tracing(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(default_directive))
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
