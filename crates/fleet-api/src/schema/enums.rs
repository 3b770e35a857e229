//! # GraphQL Enum Types
//!
//! Enum definitions for the GraphQL schema.

use async_graphql::Enum;
use fleet_domain as domain;

/// Drone operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum DroneStatus {
    /// Powered and idle, drifting on station
    Online,
    /// Out of contact, on the ground
    Offline,
    /// On the charger
    Charging,
    /// Flying a mission
    InMission,
}

impl From<domain::DroneStatus> for DroneStatus {
    fn from(s: domain::DroneStatus) -> Self {
        match s {
            domain::DroneStatus::Online => Self::Online,
            domain::DroneStatus::Offline => Self::Offline,
            domain::DroneStatus::Charging => Self::Charging,
            domain::DroneStatus::InMission => Self::InMission,
        }
    }
}

impl From<DroneStatus> for domain::DroneStatus {
    fn from(s: DroneStatus) -> Self {
        match s {
            DroneStatus::Online => Self::Online,
            DroneStatus::Offline => Self::Offline,
            DroneStatus::Charging => Self::Charging,
            DroneStatus::InMission => Self::InMission,
        }
    }
}

/// Mission lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl From<domain::MissionStatus> for MissionStatus {
    fn from(s: domain::MissionStatus) -> Self {
        match s {
            domain::MissionStatus::Pending => Self::Pending,
            domain::MissionStatus::InProgress => Self::InProgress,
            domain::MissionStatus::Completed => Self::Completed,
            domain::MissionStatus::Failed => Self::Failed,
        }
    }
}

impl From<MissionStatus> for domain::MissionStatus {
    fn from(s: MissionStatus) -> Self {
        match s {
            MissionStatus::Pending => Self::Pending,
            MissionStatus::InProgress => Self::InProgress,
            MissionStatus::Completed => Self::Completed,
            MissionStatus::Failed => Self::Failed,
        }
    }
}

/// Action performed at a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum WaypointAction {
    #[default]
    None,
    Hover,
    Capture,
    Scan,
}

impl From<domain::WaypointAction> for WaypointAction {
    fn from(a: domain::WaypointAction) -> Self {
        match a {
            domain::WaypointAction::None => Self::None,
            domain::WaypointAction::Hover => Self::Hover,
            domain::WaypointAction::Capture => Self::Capture,
            domain::WaypointAction::Scan => Self::Scan,
        }
    }
}

impl From<WaypointAction> for domain::WaypointAction {
    fn from(a: WaypointAction) -> Self {
        match a {
            WaypointAction::None => Self::None,
            WaypointAction::Hover => Self::Hover,
            WaypointAction::Capture => Self::Capture,
            WaypointAction::Scan => Self::Scan,
        }
    }
}

/// Flight command; emergency stop has its own mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum DroneCommand {
    /// Arm motors, drone goes online
    Arm,
    /// Launch into a mission; needs at least 20% battery
    Takeoff,
    /// Land in place
    Land,
    /// Return to launch
    Rtl,
}

impl From<DroneCommand> for domain::DroneCommand {
    fn from(c: DroneCommand) -> Self {
        match c {
            DroneCommand::Arm => Self::Arm,
            DroneCommand::Takeoff => Self::Takeoff,
            DroneCommand::Land => Self::Land,
            DroneCommand::Rtl => Self::Rtl,
        }
    }
}
