//! # Fleet Simulator
//!
//! In-memory simulation engine for the drone fleet dashboard.
//!
//! ## Features
//!
//! - Seeded fleet and mission history generation
//! - Fixed-tick drone movement, battery drain, charging and status flips
//! - Query/mutation surface for drones, missions, telemetry and fleet stats
//! - Operator commands (ARM, TAKEOFF, LAND, RTL, emergency stop)
//!
//! The engine is a plain value: construct it at the composition root, wrap
//! it with [`FleetEngine::into_shared`] and hand the handle to the tick loop
//! ([`run_simulation`]) and to request handlers. Tests call
//! [`FleetEngine::tick`] directly.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod scheduler;
pub mod seed;
pub mod tick;

pub use config::SimulationConfig;
pub use engine::{FleetEngine, FleetSnapshot, SharedEngine, TickReport};
pub use scheduler::{MIN_TICK_PERIOD, run_simulation};
pub use seed::{FleetSeeder, SimRng};

#[cfg(test)]
mod proptests {
    use super::*;
    use fleet_domain::{DroneFilters, DroneStatus};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn battery_and_grounding_hold_for_any_seed(
            seed in any::<u64>(),
            ticks in 0usize..300,
            flip in 0.0f64..=1.0,
        ) {
            let config = SimulationConfig {
                status_flip_probability: flip,
                ..SimulationConfig::seeded(seed).with_fleet_size(12, 0)
            };
            let mut engine = FleetEngine::new(config);

            for _ in 0..ticks {
                let report = engine.tick();
                prop_assert!(report.faulted.is_empty());
            }

            for drone in engine.drones(&DroneFilters::default()) {
                prop_assert!((0.0..=100.0).contains(&drone.battery));
                if drone.status == DroneStatus::Offline {
                    prop_assert_eq!(drone.altitude, 0.0);
                    prop_assert_eq!(drone.speed, 0.0);
                }
            }
        }

        #[test]
        fn mission_creation_depends_only_on_route_length(count in 0u32..16, seed in any::<u64>()) {
            let mut engine = FleetEngine::new(SimulationConfig::seeded(seed).with_fleet_size(3, 0));
            let mut seeder_rng = <SimRng as rand::SeedableRng>::seed_from_u64(seed);
            let waypoints = FleetSeeder::new(Default::default(), &mut seeder_rng).waypoints(count);

            let result = engine.create_mission(fleet_domain::NewMission {
                name: "Survey".to_string(),
                drone_id: "drone-1".to_string(),
                waypoints,
            });

            if count < 5 {
                prop_assert!(result.is_err());
                prop_assert!(engine.missions(None).is_empty());
            } else {
                let created = result.unwrap();
                let missions = engine.missions(None);
                prop_assert_eq!(missions.len(), 1);
                prop_assert_eq!(&missions[0].id, &created.id);
                prop_assert_eq!(missions[0].status, fleet_domain::MissionStatus::Pending);
            }
        }
    }
}
