//! Fleet-level simulation engine owning all drone, mission and telemetry state.

use chrono::{DateTime, Utc};
use fleet_domain::{
    DomainError, Drone, DroneCommand, DroneFilters, DroneStatus, FlightStats, Mission,
    MissionStatus, MissionUpdate, NewMission, Telemetry,
};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::seed::{FleetSeeder, SimRng, fresh_id, initial_telemetry};
use crate::tick::advance_drone;

/// Engine handle shared between the tick task and request handlers.
pub type SharedEngine = Arc<Mutex<FleetEngine>>;

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub updated: usize,
    /// Drones whose update was discarded this tick
    pub faulted: Vec<String>,
}

/// Serializable copy of the full engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub tick: u64,
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
    pub telemetry: Vec<Telemetry>,
    pub stats: FlightStats,
}

/// In-memory fleet simulation.
///
/// Holds the canonical fleet, mission list (newest first) and per-drone
/// telemetry. All reads hand out clones; all writes validate before mutating.
pub struct FleetEngine {
    config: SimulationConfig,
    drones: Vec<Drone>,
    missions: Vec<Mission>,
    telemetry: HashMap<String, Telemetry>,
    rng: SimRng,
    tick_count: u64,
}

impl FleetEngine {
    /// Create an engine and seed its fleet and mission history.
    pub fn new(config: SimulationConfig) -> Self {
        let mut rng = rng_for(&config);
        let now = Utc::now();

        let mut seeder = FleetSeeder::new(config.base, &mut rng);
        let drones = seeder.drones(config.drone_count, now);
        let missions = seeder.missions(config.mission_count, config.drone_count, now);

        info!(
            seed = ?config.seed,
            drones = drones.len(),
            missions = missions.len(),
            "Fleet seeded"
        );

        Self::assemble(config, drones, missions, rng, now)
    }

    /// Create an engine over an explicit fleet and mission list.
    ///
    /// Missions are reordered newest-created-first; telemetry is initialized
    /// from each drone's state.
    pub fn with_state(config: SimulationConfig, drones: Vec<Drone>, mut missions: Vec<Mission>) -> Self {
        missions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let rng = rng_for(&config);
        Self::assemble(config, drones, missions, rng, Utc::now())
    }

    fn assemble(
        config: SimulationConfig,
        drones: Vec<Drone>,
        missions: Vec<Mission>,
        mut rng: SimRng,
        now: DateTime<Utc>,
    ) -> Self {
        let telemetry = drones
            .iter()
            .map(|d| (d.id.clone(), initial_telemetry(d, &mut rng, now)))
            .collect();

        Self {
            config,
            drones,
            missions,
            telemetry,
            rng,
            tick_count: 0,
        }
    }

    /// Wrap the engine for sharing across tasks.
    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Advance every drone by one tick.
    ///
    /// Each drone is advanced on a working copy. A drone whose update fails
    /// its invariants keeps its previous state and is listed in the report;
    /// the remaining drones are unaffected.
    pub fn tick(&mut self) -> TickReport {
        let now = Utc::now();
        self.tick_count += 1;

        let mut updated = 0;
        let mut faulted = Vec::new();

        for drone in &mut self.drones {
            let mut next = drone.clone();
            let mut snapshot = match self.telemetry.get(&drone.id) {
                Some(t) => t.clone(),
                None => initial_telemetry(drone, &mut self.rng, now),
            };

            match advance_drone(&mut next, &mut snapshot, &mut self.rng, &self.config, now) {
                Ok(()) => {
                    if next.status != drone.status {
                        debug!(
                            drone_id = %drone.id,
                            from = %drone.status,
                            to = %next.status,
                            battery = next.battery,
                            "Drone status changed"
                        );
                    }
                    *drone = next;
                    self.telemetry.insert(drone.id.clone(), snapshot);
                    updated += 1;
                }
                Err(err) => {
                    warn!(drone_id = %drone.id, error = %err, "Discarding drone update");
                    faulted.push(drone.id.clone());
                }
            }
        }

        TickReport {
            tick: self.tick_count,
            updated,
            faulted,
        }
    }

    // =========================================================================
    // DRONES
    // =========================================================================

    /// List drones matching every populated filter, in fleet order.
    pub fn drones(&self, filters: &DroneFilters) -> Vec<Drone> {
        self.drones
            .iter()
            .filter(|d| filters.matches(d))
            .cloned()
            .collect()
    }

    pub fn drone(&self, id: &str) -> Option<Drone> {
        self.drones.iter().find(|d| d.id == id).cloned()
    }

    /// Administrative status override, bypassing tick logic.
    ///
    /// Offline and charging ground the drone.
    pub fn update_drone_status(&mut self, id: &str, status: DroneStatus) -> Option<Drone> {
        let drone = self.drones.iter_mut().find(|d| d.id == id)?;
        drone.set_status(status);
        info!(drone_id = %id, status = %status, "Drone status overridden");
        Some(drone.clone())
    }

    /// Execute an operator command.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] for an unknown drone,
    /// [`DomainError::CommandRejected`] when the command's preconditions fail.
    /// A rejected command leaves the drone untouched.
    pub fn execute_command(&mut self, id: &str, command: DroneCommand) -> Result<Drone, DomainError> {
        let drone = self
            .drones
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DomainError::drone_not_found(id))?;

        let status = command.target_status(drone)?;
        drone.set_status(status);

        info!(drone_id = %id, command = %command, status = %status, "Command executed");
        Ok(drone.clone())
    }

    // =========================================================================
    // MISSIONS
    // =========================================================================

    /// List missions newest first, optionally only those flown by `drone_id`.
    pub fn missions(&self, drone_id: Option<&str>) -> Vec<Mission> {
        self.missions
            .iter()
            .filter(|m| drone_id.is_none_or(|id| m.drone_id == id))
            .cloned()
            .collect()
    }

    pub fn mission(&self, id: &str) -> Option<Mission> {
        self.missions.iter().find(|m| m.id == id).cloned()
    }

    /// Create a pending mission at the head of the list.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on missing fields or too few waypoints.
    pub fn create_mission(&mut self, input: NewMission) -> Result<Mission, DomainError> {
        input.validate()?;

        let mission = Mission {
            id: fresh_id("mission", &mut self.rng),
            name: input.name,
            drone_id: input.drone_id,
            status: MissionStatus::Pending,
            waypoints: input.waypoints,
            created_at: Utc::now(),
            completed_at: None,
            duration: None,
        };

        info!(
            mission_id = %mission.id,
            drone_id = %mission.drone_id,
            waypoints = mission.waypoints.len(),
            "Mission created"
        );

        self.missions.insert(0, mission.clone());
        Ok(mission)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] for an unknown id,
    /// [`DomainError::Validation`] if the update is invalid (nothing applied).
    pub fn update_mission(&mut self, id: &str, update: MissionUpdate) -> Result<Mission, DomainError> {
        let mission = self
            .missions
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::mission_not_found(id))?;

        update.validate()?;
        update.apply_to(mission);

        info!(mission_id = %id, status = %mission.status, "Mission updated");
        Ok(mission.clone())
    }

    /// Mark a mission completed now, keeping an existing duration or
    /// drawing one of 10-60 minutes.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] for an unknown id.
    pub fn complete_mission(&mut self, id: &str) -> Result<Mission, DomainError> {
        let mission = self
            .missions
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::mission_not_found(id))?;

        let duration = match mission.duration {
            Some(d) => d,
            None => self.rng.gen_range(600..=3600),
        };

        mission.status = MissionStatus::Completed;
        mission.completed_at = Some(Utc::now());
        mission.duration = Some(duration);

        info!(mission_id = %id, duration_secs = duration, "Mission completed");
        Ok(mission.clone())
    }

    /// Remove a mission, returning it. `None` leaves the list untouched.
    pub fn delete_mission(&mut self, id: &str) -> Option<Mission> {
        let index = self.missions.iter().position(|m| m.id == id)?;
        let removed = self.missions.remove(index);
        info!(mission_id = %id, "Mission deleted");
        Some(removed)
    }

    // =========================================================================
    // TELEMETRY & ANALYTICS
    // =========================================================================

    pub fn telemetry(&self, drone_id: &str) -> Option<Telemetry> {
        self.telemetry.get(drone_id).cloned()
    }

    /// Telemetry for every drone, in fleet order.
    pub fn all_telemetry(&self) -> Vec<Telemetry> {
        self.drones
            .iter()
            .filter_map(|d| self.telemetry.get(&d.id).cloned())
            .collect()
    }

    pub fn stats(&self) -> FlightStats {
        FlightStats::compute(&self.drones, &self.missions)
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            tick: self.tick_count,
            drones: self.drones.clone(),
            missions: self.missions.clone(),
            telemetry: self.all_telemetry(),
            stats: self.stats(),
        }
    }
}

fn rng_for(config: &SimulationConfig) -> SimRng {
    match config.seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_entropy(),
    }
}
