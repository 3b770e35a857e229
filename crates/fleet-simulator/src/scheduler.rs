//! Fixed-interval tick loop.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{MissedTickBehavior, interval};

use crate::engine::SharedEngine;

/// Shortest tick period the loop will run at.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Drive `engine.tick()` every `period` until `shutdown` fires.
///
/// The engine lock is held only for the duration of a single tick. A tick
/// that runs late is skipped rather than replayed in a burst. Periods below
/// [`MIN_TICK_PERIOD`] are raised to it.
pub async fn run_simulation(
    engine: SharedEngine,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let period = period.max(MIN_TICK_PERIOD);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(period_ms = period.as_millis(), "Simulation loop started");

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Simulation loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let report = engine.lock().await.tick();

                if report.faulted.is_empty() {
                    tracing::debug!(tick = report.tick, updated = report.updated, "Tick");
                } else {
                    tracing::warn!(
                        tick = report.tick,
                        updated = report.updated,
                        faulted = ?report.faulted,
                        "Tick completed with faulted drones"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FleetEngine, SimulationConfig};

    #[tokio::test]
    async fn test_loop_ticks_until_shutdown() {
        let engine = FleetEngine::new(SimulationConfig::seeded(1).with_fleet_size(4, 0)).into_shared();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(run_simulation(
            engine.clone(),
            Duration::from_millis(5),
            shutdown_rx,
        ));

        tokio::time::sleep(Duration::from_millis(60)).await;
        shutdown_tx.send(()).unwrap();
        tokio_test::assert_ok!(handle.await);

        let ticks = engine.lock().await.tick_count();
        assert!(ticks >= 1);

        // no further ticks after shutdown
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(engine.lock().await.tick_count(), ticks);
    }

    #[tokio::test]
    async fn test_zero_period_still_ticks() {
        let engine = FleetEngine::new(SimulationConfig::seeded(2).with_fleet_size(2, 0)).into_shared();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(run_simulation(engine.clone(), Duration::ZERO, shutdown_rx));

        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown_tx.send(()).unwrap();
        tokio_test::assert_ok!(handle.await);

        assert!(engine.lock().await.tick_count() >= 1);
    }
}
