//! Simulation tuning knobs.

use fleet_domain::Position;
use std::time::Duration;

/// Configuration for a fleet simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub drone_count: usize,
    pub mission_count: usize,
    /// Center of the operating area
    pub base: Position,
    pub tick_interval: Duration,
    /// Chance per tick that a drone's status is reassigned to online/offline
    pub status_flip_probability: f64,
    /// Battery level that forces a drone onto the charger
    pub low_battery_threshold: f64,
    /// Battery gained per tick while charging
    pub charge_rate: f64,
}

impl SimulationConfig {
    /// Deterministic configuration for tests and replays
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_fleet_size(mut self, drones: usize, missions: usize) -> Self {
        self.drone_count = drones;
        self.mission_count = missions;
        self
    }

    pub(crate) fn flip_probability(&self) -> f64 {
        if self.status_flip_probability.is_nan() {
            return 0.0;
        }
        self.status_flip_probability.clamp(0.0, 1.0)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drone_count: 25,
            mission_count: 55,
            base: Position::default(),
            tick_interval: Duration::from_secs(1),
            status_flip_probability: 0.05,
            low_battery_threshold: 10.0,
            charge_rate: 0.5,
        }
    }
}
