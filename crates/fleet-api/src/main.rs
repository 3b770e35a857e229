//! # Drone Fleet GraphQL API Server
//!
//! Binary entry point: seeds the fleet, starts the tick loop and serves
//! the GraphQL API until shutdown.

use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_api::{ApiContext, Config, FaultInjector, build_router, build_schema};
use fleet_simulator::{FleetEngine, run_simulation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = fleet_api::VERSION,
        "Starting Drone Fleet GraphQL API"
    );

    // Seed the simulation
    let engine = FleetEngine::new(config.simulation.clone()).into_shared();

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let ticker = tokio::spawn(run_simulation(
        engine.clone(),
        config.simulation.tick_interval,
        shutdown_tx.subscribe(),
    ));

    tracing::info!(
        tick_ms = u64::try_from(config.simulation.tick_interval.as_millis()).unwrap_or(u64::MAX),
        fault_rate = config.faults.failure_rate,
        "Simulation started"
    );

    // Build API context and schema
    let api_ctx = ApiContext::new(engine, FaultInjector::new(config.faults.clone()));
    let schema = build_schema(api_ctx, &config);

    tracing::info!(
        max_depth = config.max_query_depth,
        max_complexity = config.max_query_complexity,
        "GraphQL schema built"
    );

    let app = build_router(schema, &config);

    // Start server
    let addr = config.server_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "GraphQL Playground available at http://{addr}/graphql");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the tick loop once the server has drained
    let _ = shutdown_tx.send(());
    ticker.await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
