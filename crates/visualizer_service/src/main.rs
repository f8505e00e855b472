// =============================================================================
// Quantum State Visualizer - Service Binary
// =============================================================================

use anyhow::Context;
use clap::Parser;
use visualizer_service::configuration::{CommandLineArguments, ServiceConfiguration};
use visualizer_service::{run_service, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arguments = CommandLineArguments::parse();
    let configuration =
        ServiceConfiguration::load(&arguments).context("loading service configuration")?;
    telemetry::initialize_tracing(&configuration.log_filter)?;

    tracing::info!("Starting Quantum State Visualizer API");
    tracing::info!("  GET  /                     - Health check");
    tracing::info!("  POST /api/process-circuit  - Process quantum circuit");
    tracing::info!("  GET  /api/example-circuits - Get example circuits");
    tracing::info!("  GET  /api/supported-gates  - Get supported gates");

    run_service(configuration, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "could not listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        tracing::info!("shutdown signal received");
    })
    .await
}
