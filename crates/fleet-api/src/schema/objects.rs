//! # GraphQL Output Types
//!
//! Object type definitions for GraphQL responses.

use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};
use chrono::{DateTime, Utc};

use super::enums::*;
use crate::context::ApiContext;
use fleet_domain as domain;

fn saturating_i32<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Geographic position
#[derive(Debug, Clone, SimpleObject)]
pub struct Position {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl From<domain::Position> for Position {
    fn from(p: domain::Position) -> Self {
        Self { lat: p.lat, lng: p.lng }
    }
}

// =============================================================================
// FLEET TYPES
// =============================================================================

/// A simulated drone
#[derive(Debug, Clone, SimpleObject)]
pub struct Drone {
    pub id: ID,
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
    pub flight_hours: i32,
    pub last_mission: DateTime<Utc>,
}

impl From<domain::Drone> for Drone {
    fn from(d: domain::Drone) -> Self {
        Self {
            id: ID(d.id),
            name: d.name,
            model: d.model,
            status: d.status.into(),
            battery: d.battery,
            position: d.position.into(),
            altitude: d.altitude,
            speed: d.speed,
            flight_hours: saturating_i32(d.flight_hours),
            last_mission: d.last_mission,
        }
    }
}

/// Latest sensor snapshot of a drone
#[derive(Debug, Clone, SimpleObject)]
pub struct Telemetry {
    pub drone_id: ID,
    pub position: Position,
    pub altitude: f64,
    pub speed: f64,
    pub battery: f64,
    /// GPS signal quality, percent
    pub gps_signal: i32,
    /// Degrees, 0 = North
    pub heading: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<domain::Telemetry> for Telemetry {
    fn from(t: domain::Telemetry) -> Self {
        Self {
            drone_id: ID(t.drone_id),
            position: t.position.into(),
            altitude: t.altitude,
            speed: t.speed,
            battery: t.battery,
            gps_signal: i32::from(t.gps_signal),
            heading: t.heading,
            timestamp: t.timestamp,
        }
    }
}

// =============================================================================
// MISSION TYPES
// =============================================================================

/// One point of a mission route
#[derive(Debug, Clone, SimpleObject)]
pub struct Waypoint {
    pub id: ID,
    /// Zero-based position in the route
    pub order: i32,
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
    pub speed: f64,
    pub action: WaypointAction,
}

impl From<domain::Waypoint> for Waypoint {
    fn from(w: domain::Waypoint) -> Self {
        Self {
            id: ID(w.id),
            order: saturating_i32(w.order),
            lat: w.lat,
            lng: w.lng,
            altitude: w.altitude,
            speed: w.speed,
            action: w.action.into(),
        }
    }
}

/// A planned or flown mission
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Mission {
    pub id: ID,
    pub name: String,
    pub drone_id: ID,
    pub status: MissionStatus,
    pub waypoints: Vec<Waypoint>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Flight duration in seconds, set once completed
    pub duration: Option<i32>,
}

#[ComplexObject]
impl Mission {
    /// Drone assigned to this mission, if it still exists
    async fn drone(&self, ctx: &Context<'_>) -> Result<Option<Drone>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let engine = api_ctx.engine.lock().await;
        Ok(engine.drone(self.drone_id.as_str()).map(Drone::from))
    }

    /// Number of waypoints in the route
    async fn waypoint_count(&self) -> i32 {
        saturating_i32(self.waypoints.len())
    }
}

impl From<domain::Mission> for Mission {
    fn from(m: domain::Mission) -> Self {
        Self {
            id: ID(m.id),
            name: m.name,
            drone_id: ID(m.drone_id),
            status: m.status.into(),
            waypoints: m.waypoints.into_iter().map(Waypoint::from).collect(),
            created_at: m.created_at,
            completed_at: m.completed_at,
            duration: m.duration.map(saturating_i32),
        }
    }
}

/// Result of deleting a mission
#[derive(Debug, Clone, SimpleObject)]
pub struct DeleteMissionResult {
    pub id: ID,
}

// =============================================================================
// ANALYTICS TYPES
// =============================================================================

/// Fleet-wide statistics
#[derive(Debug, Clone, SimpleObject)]
pub struct FlightStats {
    pub total_flight_hours: i32,
    pub average_battery: f64,
    /// Percentage of missions completed (0-100)
    pub mission_success_rate: f64,
    /// Drones online or in a mission
    pub active_drones: i32,
    pub inactive_drones: i32,
    pub total_missions: i32,
}

impl From<domain::FlightStats> for FlightStats {
    fn from(s: domain::FlightStats) -> Self {
        Self {
            total_flight_hours: saturating_i32(s.total_flight_hours),
            average_battery: s.average_battery,
            mission_success_rate: s.mission_success_rate,
            active_drones: saturating_i32(s.active_drones),
            inactive_drones: saturating_i32(s.inactive_drones),
            total_missions: saturating_i32(s.total_missions),
        }
    }
}
