// =============================================================================
// Quantum State Visualizer - HTTP Service
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Server entry point
// =============================================================================
// Purpose: Serves the Bloch engine over HTTP for the circuit-builder UI:
//          health, circuit processing, example circuits and the gate catalog.
// =============================================================================

pub mod configuration;
pub mod routes;
pub mod telemetry;

use crate::configuration::ServiceConfiguration;
use std::future::Future;

/// Binds and serves until `shutdown` resolves.
pub async fn run_service(
    configuration: ServiceConfiguration,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let routes = routes::service_routes(configuration.clone());
    let (bound_address, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(configuration.bind_address, shutdown)
        .map_err(|err| anyhow::anyhow!("failed to bind {}: {err}", configuration.bind_address))?;

    tracing::info!(
        address = %bound_address,
        maximum_request_bytes = configuration.maximum_request_bytes,
        consistency_tolerance = configuration.tolerances.consistency_tolerance,
        "Quantum State Visualizer API listening"
    );
    server.await;
    tracing::info!("server stopped");
    Ok(())
}
