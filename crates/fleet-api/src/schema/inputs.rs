//! # GraphQL Input Types
//!
//! Input object definitions for mutations and queries.

use async_graphql::InputObject;

use super::enums::*;
use fleet_domain as domain;

// =============================================================================
// QUERY FILTER INPUTS
// =============================================================================

/// Drone query filter
#[derive(Debug, Clone, InputObject, Default)]
pub struct DroneFilterInput {
    /// Filter by status
    pub status: Option<DroneStatus>,
    /// Case-insensitive match on name, model or id
    pub search: Option<String>,
    /// Minimum battery percentage (inclusive)
    pub min_battery: Option<f64>,
    /// Maximum battery percentage (inclusive)
    pub max_battery: Option<f64>,
}

impl From<DroneFilterInput> for domain::DroneFilters {
    fn from(f: DroneFilterInput) -> Self {
        Self {
            status: f.status.map(Into::into),
            search: f.search,
            min_battery: f.min_battery,
            max_battery: f.max_battery,
        }
    }
}

// =============================================================================
// MISSION INPUTS
// =============================================================================

/// Single route point
#[derive(Debug, Clone, InputObject)]
pub struct WaypointInput {
    /// Waypoint id; generated from the route position when omitted
    pub id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Meters above ground
    pub altitude: f64,
    /// Meters per second
    pub speed: f64,
    #[graphql(default)]
    pub action: WaypointAction,
}

impl WaypointInput {
    fn into_domain(self, order: u32) -> domain::Waypoint {
        domain::Waypoint {
            id: self.id.unwrap_or_else(|| format!("waypoint-{order}")),
            order,
            lat: self.lat,
            lng: self.lng,
            altitude: self.altitude,
            speed: self.speed,
            action: self.action.into(),
        }
    }
}

/// Route order follows list order
fn into_route(waypoints: Vec<WaypointInput>) -> Vec<domain::Waypoint> {
    (0_u32..)
        .zip(waypoints)
        .map(|(order, wp)| wp.into_domain(order))
        .collect()
}

/// Input for creating a mission
#[derive(Debug, Clone, InputObject)]
pub struct CreateMissionInput {
    pub name: String,
    pub drone_id: String,
    /// At least five waypoints
    pub waypoints: Vec<WaypointInput>,
}

impl From<CreateMissionInput> for domain::NewMission {
    fn from(input: CreateMissionInput) -> Self {
        Self {
            name: input.name,
            drone_id: input.drone_id,
            waypoints: into_route(input.waypoints),
        }
    }
}

/// Partial mission update; omitted fields are left untouched
#[derive(Debug, Clone, InputObject, Default)]
pub struct UpdateMissionInput {
    pub name: Option<String>,
    pub status: Option<MissionStatus>,
    pub waypoints: Option<Vec<WaypointInput>>,
}

impl From<UpdateMissionInput> for domain::MissionUpdate {
    fn from(input: UpdateMissionInput) -> Self {
        Self {
            name: input.name,
            status: input.status.map(Into::into),
            waypoints: input.waypoints.map(into_route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64) -> WaypointInput {
        WaypointInput {
            id: None,
            lat,
            lng: -122.4,
            altitude: 50.0,
            speed: 10.0,
            action: WaypointAction::default(),
        }
    }

    #[test]
    fn test_route_order_follows_input() {
        let input = CreateMissionInput {
            name: "Survey".to_string(),
            drone_id: "drone-1".to_string(),
            waypoints: (0..5).map(|i| point(37.0 + f64::from(i))).collect(),
        };

        let mission = domain::NewMission::from(input);
        assert_eq!(mission.waypoints.len(), 5);
        for (i, wp) in mission.waypoints.iter().enumerate() {
            assert_eq!(wp.order as usize, i);
            assert_eq!(wp.id, format!("waypoint-{i}"));
            assert_eq!(wp.action, domain::WaypointAction::None);
        }
    }

    #[test]
    fn test_explicit_waypoint_id_kept() {
        let mut wp = point(37.0);
        wp.id = Some("wp-a".to_string());
        let update = domain::MissionUpdate::from(UpdateMissionInput {
            waypoints: Some(vec![wp]),
            ..Default::default()
        });
        assert_eq!(update.waypoints.unwrap()[0].id, "wp-a");
        assert!(update.name.is_none());
    }

    #[test]
    fn test_filter_conversion() {
        let filters = domain::DroneFilters::from(DroneFilterInput {
            status: Some(DroneStatus::InMission),
            min_battery: Some(30.0),
            ..Default::default()
        });
        assert_eq!(filters.status, Some(domain::DroneStatus::InMission));
        assert_eq!(filters.min_battery, Some(30.0));
        assert!(filters.search.is_none());
    }
}
