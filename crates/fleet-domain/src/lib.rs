//! # Drone Fleet - Domain Model
//!
//! Core entities, value objects, and enums for the simulated drone fleet.
//! These types are the single source of truth across all layers: the
//! simulation engine, the GraphQL API, and the JSON contract consumed by the
//! dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of waypoints a mission must carry
pub const MIN_MISSION_WAYPOINTS: usize = 5;

/// Battery level (percent) below which TAKEOFF is refused
pub const MIN_TAKEOFF_BATTERY: f64 = 20.0;

/// Upper bound of the battery gauge
pub const FULL_BATTERY: f64 = 100.0;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Offset this position by a delta in degrees
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }

    /// Compass bearing in degrees (0 = North) from `self` towards `other`
    #[must_use]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl Default for Position {
    fn default() -> Self {
        // San Francisco
        Self {
            lat: 37.7749,
            lng: -122.4194,
        }
    }
}

// =============================================================================
// ENUMS
// =============================================================================

/// Drone operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DroneStatus {
    Online,
    Offline,
    Charging,
    InMission,
}

impl DroneStatus {
    pub const ALL: [Self; 4] = [Self::Online, Self::Offline, Self::Charging, Self::InMission];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Charging => "charging",
            Self::InMission => "in-mission",
        }
    }

    /// Online and in-mission drones count as active; the simulation moves
    /// and drains only these.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Online | Self::InMission)
    }

    /// Statuses in which a drone is on the ground with zero altitude/speed
    pub const fn is_grounded(&self) -> bool {
        matches!(self, Self::Offline | Self::Charging)
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mission lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl MissionStatus {
    pub const ALL: [Self; 4] = [Self::Completed, Self::InProgress, Self::Failed, Self::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action performed on arrival at a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointAction {
    #[default]
    None,
    Hover,
    Capture,
    Scan,
}

impl WaypointAction {
    pub const ALL: [Self; 4] = [Self::Hover, Self::Capture, Self::Scan, Self::None];
}

/// Operator command sent to a single drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneCommand {
    Arm,
    Takeoff,
    Land,
    Rtl, // Return to Launch
    EmergencyStop,
}

impl DroneCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arm => "ARM",
            Self::Takeoff => "TAKEOFF",
            Self::Land => "LAND",
            Self::Rtl => "RTL",
            Self::EmergencyStop => "EMERGENCY_STOP",
        }
    }

    /// Resolve the status this command moves `drone` into.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CommandRejected`] when TAKEOFF is requested
    /// with the battery below [`MIN_TAKEOFF_BATTERY`].
    pub fn target_status(&self, drone: &Drone) -> Result<DroneStatus, DomainError> {
        match self {
            Self::Arm | Self::Land | Self::Rtl => Ok(DroneStatus::Online),
            Self::Takeoff if drone.battery < MIN_TAKEOFF_BATTERY => {
                Err(DomainError::CommandRejected {
                    command: *self,
                    reason: "Battery too low for takeoff".to_string(),
                })
            }
            Self::Takeoff => Ok(DroneStatus::InMission),
            Self::EmergencyStop => Ok(DroneStatus::Offline),
        }
    }
}

impl fmt::Display for DroneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Drone entity - one simulated airframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub id: String,
    pub name: String,
    pub model: String,
    pub status: DroneStatus,

    /// Battery charge, 0-100
    pub battery: f64,
    pub position: Position,
    /// Meters above ground
    pub altitude: f64,
    /// Meters per second
    pub speed: f64,

    pub flight_hours: u32,
    pub last_mission: DateTime<Utc>,
}

impl Drone {
    /// Zero altitude and speed
    pub fn ground(&mut self) {
        self.altitude = 0.0;
        self.speed = 0.0;
    }

    /// Change status, grounding the airframe when the new status requires it
    pub fn set_status(&mut self, status: DroneStatus) {
        self.status = status;
        if status.is_grounded() {
            self.ground();
        }
    }

    /// Check the numeric invariants the simulation must preserve
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] describing the first violation.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        if !self.battery.is_finite() || !(0.0..=FULL_BATTERY).contains(&self.battery) {
            return Err(DomainError::invalid_state(&self.id, format!("battery {}", self.battery)));
        }
        if !self.position.is_finite() {
            return Err(DomainError::invalid_state(
                &self.id,
                format!("position {:?}", self.position),
            ));
        }
        if !self.altitude.is_finite() || !self.speed.is_finite() {
            return Err(DomainError::invalid_state(&self.id, "non-finite altitude/speed"));
        }
        if self.status == DroneStatus::Offline && (self.altitude != 0.0 || self.speed != 0.0) {
            return Err(DomainError::invalid_state(&self.id, "offline drone is airborne"));
        }
        Ok(())
    }
}

/// Waypoint - one point in a mission's ordered flight path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub id: String,
    /// Position in the sequence, zero-based
    pub order: u32,
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
    pub speed: f64,
    #[serde(default)]
    pub action: WaypointAction,
}

/// Mission entity - planned or executed flight assigned to one drone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub name: String,
    pub drone_id: String,
    pub status: MissionStatus,
    pub waypoints: Vec<Waypoint>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Flight duration in seconds, present once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Telemetry entity - latest derived sensor snapshot of a drone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub drone_id: String,
    pub position: Position,
    pub altitude: f64,
    pub speed: f64,
    pub battery: f64,
    /// GPS signal quality, percent
    pub gps_signal: u8,
    /// Degrees, 0 = North
    pub heading: f64,
    pub timestamp: DateTime<Utc>,
}

impl Telemetry {
    /// Refresh the mirrored fields from the drone's current state
    pub fn refresh_from(&mut self, drone: &Drone, now: DateTime<Utc>) {
        if drone.position != self.position {
            self.heading = self.position.bearing_to(&drone.position);
        }
        self.position = drone.position;
        self.altitude = drone.altitude;
        self.speed = drone.speed;
        self.battery = drone.battery;
        self.timestamp = now;
    }
}

// =============================================================================
// COMMAND TYPES
// =============================================================================

/// Input for creating a mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMission {
    pub name: String,
    pub drone_id: String,
    pub waypoints: Vec<Waypoint>,
}

impl NewMission {
    /// Validate required fields before anything is written
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] on a blank name or drone id, or
    /// fewer than [`MIN_MISSION_WAYPOINTS`] waypoints.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.drone_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Name and droneId are required".to_string(),
            ));
        }
        validate_waypoints(&self.waypoints)
    }
}

/// Partial update of a mission; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionUpdate {
    pub name: Option<String>,
    pub status: Option<MissionStatus>,
    pub waypoints: Option<Vec<Waypoint>>,
}

impl MissionUpdate {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the update would leave the
    /// mission with a blank name or too few waypoints.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation("Mission name cannot be empty".to_string()));
        }
        match &self.waypoints {
            Some(waypoints) => validate_waypoints(waypoints),
            None => Ok(()),
        }
    }

    /// Apply the update in place. Call [`Self::validate`] first.
    ///
    /// Leaving the completed state clears completion time and duration.
    pub fn apply_to(self, mission: &mut Mission) {
        if let Some(name) = self.name {
            mission.name = name;
        }
        if let Some(status) = self.status {
            if status != MissionStatus::Completed {
                mission.completed_at = None;
                mission.duration = None;
            }
            mission.status = status;
        }
        if let Some(waypoints) = self.waypoints {
            mission.waypoints = waypoints;
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.waypoints.is_none()
    }
}

fn validate_waypoints(waypoints: &[Waypoint]) -> Result<(), DomainError> {
    if waypoints.len() < MIN_MISSION_WAYPOINTS {
        return Err(DomainError::Validation(format!(
            "At least {MIN_MISSION_WAYPOINTS} waypoints are required, got {}",
            waypoints.len()
        )));
    }
    Ok(())
}

// =============================================================================
// QUERY/FILTER TYPES
// =============================================================================

/// Drone list filters; every populated field must match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneFilters {
    pub status: Option<DroneStatus>,
    /// Case-insensitive substring over name, model and id
    pub search: Option<String>,
    pub min_battery: Option<f64>,
    pub max_battery: Option<f64>,
}

impl DroneFilters {
    #[must_use]
    pub fn matches(&self, drone: &Drone) -> bool {
        if self.status.is_some_and(|s| s != drone.status) {
            return false;
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = [&drone.name, &drone.model, &drone.id]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if self.min_battery.is_some_and(|min| drone.battery < min) {
            return false;
        }
        if self.max_battery.is_some_and(|max| drone.battery > max) {
            return false;
        }
        true
    }
}

// =============================================================================
// ANALYTICS TYPES
// =============================================================================

/// Fleet-wide aggregate statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStats {
    pub total_flight_hours: u64,
    pub average_battery: f64,
    /// Percentage of missions completed, 0-100
    pub mission_success_rate: f64,
    pub active_drones: usize,
    pub inactive_drones: usize,
    pub total_missions: usize,
}

impl FlightStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(drones: &[Drone], missions: &[Mission]) -> Self {
        let total_flight_hours = drones.iter().map(|d| u64::from(d.flight_hours)).sum();

        let average_battery = if drones.is_empty() {
            0.0
        } else {
            drones.iter().map(|d| d.battery).sum::<f64>() / drones.len() as f64
        };

        let completed = missions
            .iter()
            .filter(|m| m.status == MissionStatus::Completed)
            .count();
        let total_missions = missions.len();
        let mission_success_rate = if total_missions > 0 {
            (completed as f64 / total_missions as f64) * 100.0
        } else {
            0.0
        };

        let active_drones = drones.iter().filter(|d| d.status.is_active()).count();

        Self {
            total_flight_hours,
            average_battery,
            mission_success_rate,
            active_drones,
            inactive_drones: drones.len() - active_drones,
            total_missions,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Command {command} rejected: {reason}")]
    CommandRejected { command: DroneCommand, reason: String },

    #[error("Invalid state for drone {id}: {detail}")]
    InvalidState { id: String, detail: String },
}

impl DomainError {
    pub fn drone_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Drone".to_string(),
            id: id.into(),
        }
    }

    pub fn mission_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Mission".to_string(),
            id: id.into(),
        }
    }

    fn invalid_state(id: &str, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            id: id.to_string(),
            detail: detail.into(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::lorem::en::Words;

    fn drone(status: DroneStatus, battery: f64) -> Drone {
        Drone {
            id: "drone-7".to_string(),
            name: "Drone 07".to_string(),
            model: "Skydio 2+".to_string(),
            status,
            battery,
            position: Position::default(),
            altitude: 0.0,
            speed: 0.0,
            flight_hours: 42,
            last_mission: Utc::now(),
        }
    }

    fn waypoints(count: u32) -> Vec<Waypoint> {
        (0..count)
            .map(|i| Waypoint {
                id: format!("waypoint-{i}"),
                order: i,
                lat: 37.77,
                lng: -122.42,
                altitude: 50.0,
                speed: 10.0,
                action: WaypointAction::Capture,
            })
            .collect()
    }

    fn mission(status: MissionStatus) -> Mission {
        Mission {
            id: "mission-1".to_string(),
            name: "Perimeter Survey 1".to_string(),
            drone_id: "drone-7".to_string(),
            status,
            waypoints: waypoints(5),
            created_at: Utc::now(),
            completed_at: None,
            duration: None,
        }
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&DroneStatus::InMission).unwrap();
        assert_eq!(json, "\"in-mission\"");
        let json = serde_json::to_string(&MissionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_drone_serializes_camel_case() {
        let value = serde_json::to_value(drone(DroneStatus::Online, 50.0)).unwrap();
        assert!(value.get("flightHours").is_some());
        assert!(value.get("lastMission").is_some());
    }

    #[test]
    fn test_set_status_grounds_offline_drone() {
        let mut d = drone(DroneStatus::InMission, 80.0);
        d.altitude = 60.0;
        d.speed = 12.0;
        d.set_status(DroneStatus::Offline);
        assert_eq!(d.altitude, 0.0);
        assert_eq!(d.speed, 0.0);
        assert!(d.check_invariants().is_ok());
    }

    #[test]
    fn test_invariants_reject_out_of_range_battery() {
        let d = drone(DroneStatus::Online, 100.5);
        assert!(matches!(d.check_invariants(), Err(DomainError::InvalidState { .. })));

        let d = drone(DroneStatus::Online, f64::NAN);
        assert!(d.check_invariants().is_err());
    }

    #[test]
    fn test_takeoff_rejected_on_low_battery() {
        let d = drone(DroneStatus::Online, 19.9);
        let err = DroneCommand::Takeoff.target_status(&d).unwrap_err();
        assert!(matches!(err, DomainError::CommandRejected { command: DroneCommand::Takeoff, .. }));

        let d = drone(DroneStatus::Online, 20.0);
        assert_eq!(DroneCommand::Takeoff.target_status(&d), Ok(DroneStatus::InMission));
    }

    #[test]
    fn test_command_targets() {
        let d = drone(DroneStatus::Charging, 5.0);
        assert_eq!(DroneCommand::Arm.target_status(&d), Ok(DroneStatus::Online));
        assert_eq!(DroneCommand::Land.target_status(&d), Ok(DroneStatus::Online));
        assert_eq!(DroneCommand::Rtl.target_status(&d), Ok(DroneStatus::Online));
        assert_eq!(DroneCommand::EmergencyStop.target_status(&d), Ok(DroneStatus::Offline));
    }

    #[test]
    fn test_new_mission_validation() {
        let name: Vec<String> = Words(1..4).fake();
        let mut input = NewMission {
            name: name.join(" "),
            drone_id: "drone-1".to_string(),
            waypoints: waypoints(4),
        };
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));

        input.waypoints = waypoints(5);
        assert!(input.validate().is_ok());

        input.name = "   ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_mission_update_applies_only_present_fields() {
        let mut m = mission(MissionStatus::Pending);
        let update = MissionUpdate {
            status: Some(MissionStatus::InProgress),
            ..Default::default()
        };
        update.validate().unwrap();
        update.apply_to(&mut m);

        assert_eq!(m.status, MissionStatus::InProgress);
        assert_eq!(m.name, "Perimeter Survey 1");
        assert_eq!(m.waypoints.len(), 5);
    }

    #[test]
    fn test_reopening_completed_mission_clears_completion() {
        let mut m = mission(MissionStatus::Completed);
        m.completed_at = Some(Utc::now());
        m.duration = Some(900);

        MissionUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        }
        .apply_to(&mut m);
        assert_eq!(m.duration, Some(900));

        MissionUpdate {
            status: Some(MissionStatus::Pending),
            ..Default::default()
        }
        .apply_to(&mut m);
        assert_eq!(m.status, MissionStatus::Pending);
        assert!(m.completed_at.is_none());
        assert!(m.duration.is_none());
    }

    #[test]
    fn test_mission_update_rejects_short_route() {
        let update = MissionUpdate {
            waypoints: Some(waypoints(2)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_filters() {
        let d = drone(DroneStatus::Charging, 35.0);

        assert!(DroneFilters::default().matches(&d));
        assert!(DroneFilters { status: Some(DroneStatus::Charging), ..Default::default() }.matches(&d));
        assert!(!DroneFilters { status: Some(DroneStatus::Online), ..Default::default() }.matches(&d));

        assert!(DroneFilters { search: Some("SKYDIO".into()), ..Default::default() }.matches(&d));
        assert!(DroneFilters { search: Some("drone-7".into()), ..Default::default() }.matches(&d));
        assert!(!DroneFilters { search: Some("mavic".into()), ..Default::default() }.matches(&d));

        let inclusive = DroneFilters {
            min_battery: Some(35.0),
            max_battery: Some(35.0),
            ..Default::default()
        };
        assert!(inclusive.matches(&d));
        assert!(!DroneFilters { min_battery: Some(35.1), ..Default::default() }.matches(&d));
    }

    #[test]
    fn test_stats_with_no_missions() {
        let drones = vec![drone(DroneStatus::Online, 40.0), drone(DroneStatus::Offline, 60.0)];
        let stats = FlightStats::compute(&drones, &[]);

        assert_eq!(stats.mission_success_rate, 0.0);
        assert_eq!(stats.total_missions, 0);
        assert_eq!(stats.total_flight_hours, 84);
        assert!((stats.average_battery - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.active_drones, 1);
        assert_eq!(stats.inactive_drones, 1);
    }

    #[test]
    fn test_stats_success_rate() {
        let missions = vec![
            mission(MissionStatus::Completed),
            mission(MissionStatus::Failed),
            mission(MissionStatus::Completed),
            mission(MissionStatus::Pending),
        ];
        let stats = FlightStats::compute(&[], &missions);

        assert!((stats.mission_success_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.average_battery, 0.0);
    }

    #[test]
    fn test_bearing() {
        let origin = Position::new(0.0, 0.0);
        assert!((origin.bearing_to(&Position::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((origin.bearing_to(&Position::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_telemetry_refresh_updates_heading_when_moved() {
        let mut d = drone(DroneStatus::Online, 70.0);
        let mut t = Telemetry {
            drone_id: d.id.clone(),
            position: d.position,
            altitude: 0.0,
            speed: 0.0,
            battery: 70.0,
            gps_signal: 90,
            heading: 123.0,
            timestamp: Utc::now(),
        };

        t.refresh_from(&d, Utc::now());
        assert_eq!(t.heading, 123.0);

        d.position = d.position.offset(0.001, 0.0);
        d.battery = 69.9;
        t.refresh_from(&d, Utc::now());
        assert!(t.heading < 1.0 || t.heading > 359.0);
        assert_eq!(t.battery, 69.9);
        assert_eq!(t.position, d.position);
    }
}
