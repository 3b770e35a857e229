//! Fleet Simulator CLI
//!
//! Runs the fleet simulation headless and logs fleet statistics.

use anyhow::Result;
use clap::Parser;
use fleet_simulator::{FleetEngine, SimulationConfig};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fleet-simulator")]
#[command(about = "Simulate a drone fleet without the API")]
struct Args {
    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of drones
    #[arg(short, long, default_value = "25")]
    drones: usize,

    /// Number of seeded missions
    #[arg(short, long, default_value = "55")]
    missions: usize,

    /// Tick interval in milliseconds (0 runs as fast as possible)
    #[arg(long, default_value = "1000")]
    tick_ms: u64,

    /// Total run length in ticks
    #[arg(long, default_value = "300")]
    duration: u32,

    /// Log fleet stats every N ticks
    #[arg(long, default_value = "30")]
    report_every: u32,

    /// Print the final fleet state as JSON
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fleet_simulator=info".parse()?))
        .init();

    let args = Args::parse();

    let config = SimulationConfig {
        seed: args.seed,
        drone_count: args.drones,
        mission_count: args.missions,
        tick_interval: Duration::from_millis(args.tick_ms),
        ..SimulationConfig::default()
    };

    info!(
        "Starting fleet simulation: {} drones, {} missions, seed {:?}",
        args.drones, args.missions, args.seed
    );
    info!("Tick: {}ms, Duration: {} ticks", args.tick_ms, args.duration);

    let tick_interval = config.tick_interval;
    let mut engine = FleetEngine::new(config);
    let report_every = args.report_every.max(1);

    for tick in 1..=args.duration {
        let report = engine.tick();
        if !report.faulted.is_empty() {
            warn!("Tick {} discarded updates for {:?}", report.tick, report.faulted);
        }

        if tick % report_every == 0 {
            log_stats(&engine, tick, args.duration);
        }

        if !tick_interval.is_zero() {
            sleep(tick_interval).await;
        }
    }

    info!("Simulation complete!");
    log_stats(&engine, args.duration, args.duration);

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }

    Ok(())
}

fn log_stats(engine: &FleetEngine, tick: u32, duration: u32) {
    let stats = engine.stats();
    info!(
        "Tick {}/{} | Active: {} | Inactive: {} | Avg battery: {:.1}% | Success rate: {:.1}% ({} missions)",
        tick,
        duration,
        stats.active_drones,
        stats.inactive_drones,
        stats.average_battery,
        stats.mission_success_rate,
        stats.total_missions
    );
}
