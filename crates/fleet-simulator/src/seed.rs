//! Initial fleet and mission history generation.

use chrono::{DateTime, Duration, Utc};
use fleet_domain::{
    Drone, DroneStatus, Mission, MissionStatus, Position, Telemetry, Waypoint, WaypointAction,
};
use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG shared by every part of the simulation
pub type SimRng = ChaCha8Rng;

const DRONE_MODELS: [&str; 5] = [
    "DJI Phantom 4",
    "DJI Mavic 3",
    "Skydio 2+",
    "Autel EVO II",
    "Parrot Anafi",
];

const MISSION_NAMES: [&str; 10] = [
    "Perimeter Survey",
    "Building Inspection",
    "Agricultural Scan",
    "Search and Rescue",
    "Package Delivery",
    "Thermal Imaging",
    "Power Line Inspection",
    "Construction Progress",
    "Mapping Mission",
    "Security Patrol",
];

/// Spread of initial drone positions around the base, degrees
const FLEET_SPREAD_DEG: f64 = 0.05;
/// Spread of generated waypoints around the base, degrees
const ROUTE_SPREAD_DEG: f64 = 0.02;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Fleet generator.
pub struct FleetSeeder<'a> {
    /// Center point for the operating area
    base: Position,
    rng: &'a mut SimRng,
}

impl<'a> FleetSeeder<'a> {
    pub fn new(base: Position, rng: &'a mut SimRng) -> Self {
        Self { base, rng }
    }

    /// Generate `count` drones named `drone-1`..`drone-N`.
    pub fn drones(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Drone> {
        (1..=count).map(|i| self.drone(i, now)).collect()
    }

    fn drone(&mut self, index: usize, now: DateTime<Utc>) -> Drone {
        let status = DroneStatus::ALL[self.rng.gen_range(0..DroneStatus::ALL.len())];
        let model = DRONE_MODELS[self.rng.gen_range(0..DRONE_MODELS.len())];

        let battery = match status {
            DroneStatus::Charging => f64::from(self.rng.gen_range(20..=60_u8)),
            _ => f64::from(self.rng.gen_range(10..=100_u8)),
        };

        let (altitude, speed) = if status == DroneStatus::InMission {
            (self.rng.gen_range(20.0..=100.0), self.rng.gen_range(5.0..=20.0))
        } else {
            (0.0, 0.0)
        };

        let position = self.base.offset(
            self.rng.gen_range(-FLEET_SPREAD_DEG..=FLEET_SPREAD_DEG),
            self.rng.gen_range(-FLEET_SPREAD_DEG..=FLEET_SPREAD_DEG),
        );

        Drone {
            id: format!("drone-{index}"),
            name: format!("Drone {index:02}"),
            model: model.to_string(),
            status,
            battery,
            position,
            altitude,
            speed,
            flight_hours: self.rng.gen_range(10..=500),
            last_mission: self.past_timestamp(now, 7),
        }
    }

    /// Generate `count` missions spread over the past 30 days, assigned to
    /// random drones in `1..=drone_count`, newest first.
    pub fn missions(&mut self, count: usize, drone_count: usize, now: DateTime<Utc>) -> Vec<Mission> {
        let mut missions: Vec<Mission> = (1..=count)
            .map(|i| self.mission(i, drone_count, now))
            .collect();

        missions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        missions
    }

    fn mission(&mut self, index: usize, drone_count: usize, now: DateTime<Utc>) -> Mission {
        let status = MissionStatus::ALL[self.rng.gen_range(0..MissionStatus::ALL.len())];
        let name = MISSION_NAMES[self.rng.gen_range(0..MISSION_NAMES.len())];
        let created_at = self.past_timestamp(now, 30);
        let duration: u32 = self.rng.gen_range(300..=3600);
        let drone = self.rng.gen_range(1..=drone_count.max(1));
        let waypoint_count = self.rng.gen_range(5..=12);

        let completed = status == MissionStatus::Completed;

        Mission {
            id: format!("mission-{index}"),
            name: format!("{name} {index}"),
            drone_id: format!("drone-{drone}"),
            status,
            waypoints: self.waypoints(waypoint_count),
            created_at,
            completed_at: completed.then(|| created_at + Duration::seconds(i64::from(duration))),
            duration: completed.then_some(duration),
        }
    }

    /// Generate a random route of `count` waypoints around the base.
    pub fn waypoints(&mut self, count: u32) -> Vec<Waypoint> {
        (0..count)
            .map(|order| Waypoint {
                id: format!("waypoint-{order}"),
                order,
                lat: self.base.lat + self.rng.gen_range(-ROUTE_SPREAD_DEG..=ROUTE_SPREAD_DEG),
                lng: self.base.lng + self.rng.gen_range(-ROUTE_SPREAD_DEG..=ROUTE_SPREAD_DEG),
                altitude: self.rng.gen_range(30.0..=100.0),
                speed: self.rng.gen_range(5.0..=15.0),
                action: WaypointAction::ALL[self.rng.gen_range(0..WaypointAction::ALL.len())],
            })
            .collect()
    }

    /// Random instant within the last `days` days.
    fn past_timestamp(&mut self, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
        now - Duration::seconds(self.rng.gen_range(0..=days * SECONDS_PER_DAY))
    }
}

/// Initial telemetry snapshot for a freshly seeded drone.
pub fn initial_telemetry(drone: &Drone, rng: &mut SimRng, now: DateTime<Utc>) -> Telemetry {
    Telemetry {
        drone_id: drone.id.clone(),
        position: drone.position,
        altitude: drone.altitude,
        speed: drone.speed,
        battery: drone.battery,
        gps_signal: rng.gen_range(70..=100),
        heading: f64::from(rng.gen_range(0..360_u16)),
        timestamp: now,
    }
}

/// Fresh entity id of the form `{prefix}-{uuid}`, drawn from the simulation
/// RNG so seeded runs stay reproducible.
pub fn fresh_id(prefix: &str, rng: &mut SimRng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
    format!("{prefix}-{}", id.simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use uuid::Uuid;

    #[test]
    fn test_seeded_fleet_bounds() {
        let mut rng = SimRng::seed_from_u64(7);
        let base = Position::default();
        let drones = FleetSeeder::new(base, &mut rng).drones(25, Utc::now());

        assert_eq!(drones.len(), 25);
        assert_eq!(drones[0].id, "drone-1");
        assert_eq!(drones[24].name, "Drone 25");

        for d in &drones {
            assert!((10.0..=100.0).contains(&d.battery));
            assert!((d.position.lat - base.lat).abs() <= FLEET_SPREAD_DEG + 1e-9);
            assert!((d.position.lng - base.lng).abs() <= FLEET_SPREAD_DEG + 1e-9);
            assert!(DRONE_MODELS.contains(&d.model.as_str()));
            match d.status {
                DroneStatus::InMission => {
                    assert!((20.0..=100.0).contains(&d.altitude));
                    assert!((5.0..=20.0).contains(&d.speed));
                }
                DroneStatus::Charging => {
                    assert!((20.0..=60.0).contains(&d.battery));
                    assert_eq!(d.altitude, 0.0);
                }
                _ => {
                    assert_eq!(d.altitude, 0.0);
                    assert_eq!(d.speed, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_seeded_missions() {
        let mut rng = SimRng::seed_from_u64(11);
        let now = Utc::now();
        let missions = FleetSeeder::new(Position::default(), &mut rng).missions(55, 25, now);

        assert_eq!(missions.len(), 55);
        assert!(missions.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        for m in &missions {
            assert!((5..=12).contains(&m.waypoints.len()));
            assert!(m.created_at <= now);
            assert!(m.created_at >= now - Duration::days(30));
            let drone: usize = m.drone_id.trim_start_matches("drone-").parse().unwrap();
            assert!((1..=25).contains(&drone));

            if m.status == MissionStatus::Completed {
                let duration = m.duration.unwrap();
                assert!((300..=3600).contains(&duration));
                assert_eq!(
                    m.completed_at.unwrap(),
                    m.created_at + Duration::seconds(i64::from(duration))
                );
            } else {
                assert!(m.duration.is_none());
                assert!(m.completed_at.is_none());
            }

            for (i, wp) in m.waypoints.iter().enumerate() {
                assert_eq!(wp.order as usize, i);
            }
        }
    }

    #[test]
    fn test_fresh_ids_are_unique_and_reproducible() {
        let mut a = SimRng::seed_from_u64(3);
        let mut b = SimRng::seed_from_u64(3);

        let first = fresh_id("mission", &mut a);
        assert_eq!(first, fresh_id("mission", &mut b));
        assert_ne!(first, fresh_id("mission", &mut a));
        assert!(first.starts_with("mission-"));

        let uuid = Uuid::parse_str(first.trim_start_matches("mission-")).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }
}
