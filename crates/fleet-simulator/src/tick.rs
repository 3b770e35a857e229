//! Per-drone state advancement for one simulation tick.

use chrono::{DateTime, Utc};
use fleet_domain::{DomainError, Drone, DroneStatus, FULL_BATTERY, Telemetry};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::seed::SimRng;

/// Maximum position jitter per tick, degrees
const POSITION_JITTER_DEG: f64 = 0.0005;
/// Battery drained per tick by an active drone, percent
const BATTERY_DRAIN_MIN: f64 = 0.05;
const BATTERY_DRAIN_MAX: f64 = 0.15;

const MISSION_SPEED_MPS: (f64, f64) = (5.0, 20.0);
const MISSION_ALTITUDE_M: (f64, f64) = (20.0, 100.0);

/// Advance one drone and its telemetry snapshot by a single tick.
///
/// Steps run in a fixed order: movement and battery drain, telemetry
/// refresh, random online/offline flip, low-battery override, charging.
/// The low-battery override therefore always wins over a random flip.
///
/// # Errors
///
/// Returns [`DomainError::InvalidState`] if the resulting drone violates
/// its invariants. Callers work on copies and discard the result on error.
pub fn advance_drone(
    drone: &mut Drone,
    telemetry: &mut Telemetry,
    rng: &mut SimRng,
    config: &SimulationConfig,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    // 1. Movement and drain
    if drone.status.is_active() {
        drone.position = drone.position.offset(
            rng.gen_range(-POSITION_JITTER_DEG..=POSITION_JITTER_DEG),
            rng.gen_range(-POSITION_JITTER_DEG..=POSITION_JITTER_DEG),
        );

        if drone.battery > 0.0 {
            let drain = rng.gen_range(BATTERY_DRAIN_MIN..=BATTERY_DRAIN_MAX);
            drone.battery = (drone.battery - drain).max(0.0);
        }

        if drone.status == DroneStatus::InMission {
            drone.speed = rng.gen_range(MISSION_SPEED_MPS.0..=MISSION_SPEED_MPS.1);
            drone.altitude = rng.gen_range(MISSION_ALTITUDE_M.0..=MISSION_ALTITUDE_M.1);
        }
    }

    // 2. Telemetry mirrors the post-movement state
    telemetry.refresh_from(drone, now);

    // 3. Random status flip
    if rng.gen_bool(config.flip_probability()) {
        let status = if rng.gen_bool(0.5) {
            DroneStatus::Online
        } else {
            DroneStatus::Offline
        };
        drone.status = status;
        if status == DroneStatus::Offline {
            drone.ground();
        }
    }

    // 4. Low battery forces charging
    if drone.battery < config.low_battery_threshold && drone.status != DroneStatus::Charging {
        drone.set_status(DroneStatus::Charging);
    }

    // 5. Charging
    if drone.status == DroneStatus::Charging {
        drone.battery = (drone.battery + config.charge_rate).min(FULL_BATTERY);
        if drone.battery >= FULL_BATTERY {
            drone.status = DroneStatus::Online;
        }
    }

    drone.check_invariants()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_telemetry;
    use fleet_domain::Position;
    use rand::SeedableRng;

    fn drone(status: DroneStatus, battery: f64) -> Drone {
        Drone {
            id: "drone-1".to_string(),
            name: "Drone 01".to_string(),
            model: "DJI Mavic 3".to_string(),
            status,
            battery,
            position: Position::default(),
            altitude: 0.0,
            speed: 0.0,
            flight_hours: 100,
            last_mission: Utc::now(),
        }
    }

    fn no_flips() -> SimulationConfig {
        SimulationConfig {
            status_flip_probability: 0.0,
            ..SimulationConfig::seeded(1)
        }
    }

    fn step(d: &mut Drone, config: &SimulationConfig, rng: &mut SimRng) -> Result<(), DomainError> {
        let mut t = initial_telemetry(d, rng, Utc::now());
        advance_drone(d, &mut t, rng, config, Utc::now())
    }

    #[test]
    fn test_low_battery_forces_charging() {
        let mut rng = SimRng::seed_from_u64(5);
        let mut d = drone(DroneStatus::Online, 9.0);
        d.altitude = 40.0;
        d.speed = 8.0;

        step(&mut d, &no_flips(), &mut rng).unwrap();

        assert_eq!(d.status, DroneStatus::Charging);
        assert_eq!(d.altitude, 0.0);
        assert_eq!(d.speed, 0.0);
        // drained by at most 0.15, then charged by 0.5
        assert!(d.battery > 9.0 - BATTERY_DRAIN_MAX);
    }

    #[test]
    fn test_low_battery_overrides_random_flip() {
        let config = SimulationConfig {
            status_flip_probability: 1.0,
            ..SimulationConfig::seeded(9)
        };
        let mut rng = SimRng::seed_from_u64(9);

        for _ in 0..50 {
            let mut d = drone(DroneStatus::Online, 5.0);
            step(&mut d, &config, &mut rng).unwrap();
            assert_eq!(d.status, DroneStatus::Charging);
        }
    }

    #[test]
    fn test_in_mission_drone_moves_and_drains() {
        let mut rng = SimRng::seed_from_u64(2);
        let mut d = drone(DroneStatus::InMission, 80.0);
        let start = d.position;

        step(&mut d, &no_flips(), &mut rng).unwrap();

        assert!(d.battery < 80.0 && d.battery >= 80.0 - BATTERY_DRAIN_MAX);
        assert_ne!(d.position, start);
        assert!((start.lat - d.position.lat).abs() <= POSITION_JITTER_DEG + 1e-12);
        assert!((MISSION_SPEED_MPS.0..=MISSION_SPEED_MPS.1).contains(&d.speed));
        assert!((MISSION_ALTITUDE_M.0..=MISSION_ALTITUDE_M.1).contains(&d.altitude));
    }

    #[test]
    fn test_offline_drone_holds_still() {
        let mut rng = SimRng::seed_from_u64(4);
        let mut d = drone(DroneStatus::Offline, 50.0);
        let start = d.position;

        step(&mut d, &no_flips(), &mut rng).unwrap();

        assert_eq!(d.position, start);
        assert_eq!(d.battery, 50.0);
        assert_eq!(d.status, DroneStatus::Offline);
    }

    #[test]
    fn test_charging_completes_to_online() {
        let mut rng = SimRng::seed_from_u64(6);
        let mut d = drone(DroneStatus::Charging, 99.8);

        step(&mut d, &no_flips(), &mut rng).unwrap();

        assert_eq!(d.battery, FULL_BATTERY);
        assert_eq!(d.status, DroneStatus::Online);
    }

    #[test]
    fn test_telemetry_mirrors_moved_drone() {
        let mut rng = SimRng::seed_from_u64(8);
        let mut d = drone(DroneStatus::InMission, 70.0);
        let mut t = initial_telemetry(&d, &mut rng, Utc::now());

        advance_drone(&mut d, &mut t, &mut rng, &no_flips(), Utc::now()).unwrap();

        assert_eq!(t.position, d.position);
        assert_eq!(t.battery, d.battery);
        assert_eq!(t.speed, d.speed);
        assert_eq!(t.altitude, d.altitude);
    }

    #[test]
    fn test_invalid_state_is_reported() {
        let mut rng = SimRng::seed_from_u64(10);
        let mut d = drone(DroneStatus::Online, 50.0);
        d.position = Position::new(f64::NAN, 0.0);

        let err = step(&mut d, &no_flips(), &mut rng).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }
}
