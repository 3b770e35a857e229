//! # GraphQL Mutation Resolver
//!
//! Write operations for the fleet API.

use async_graphql::{Context, ID, Object, Result};

use crate::context::ApiContext;
use crate::error::ApiError;
use crate::schema::*;
use fleet_domain::{self as domain, DomainError};

/// GraphQL Mutation root
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // =========================================================================
    // DRONE MUTATIONS
    // =========================================================================

    /// Set a drone's status directly, bypassing tick logic
    ///
    /// Offline and charging drones are grounded.
    async fn update_drone_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: DroneStatus,
    ) -> Result<Drone> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("updateDroneStatus").await?;

        let mut engine = api_ctx.engine.lock().await;
        let drone = engine
            .update_drone_status(&id, status.into())
            .ok_or_else(|| ApiError::from(DomainError::drone_not_found(id.as_str())))?;

        Ok(drone.into())
    }

    /// Send a flight command to a drone
    ///
    /// TAKEOFF is rejected when the battery is below 20%.
    async fn send_drone_command(
        &self,
        ctx: &Context<'_>,
        drone_id: ID,
        command: DroneCommand,
    ) -> Result<Drone> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("sendDroneCommand").await?;

        execute(api_ctx, &drone_id, command.into()).await
    }

    /// Ground a drone immediately
    ///
    /// Never subject to injected faults.
    async fn emergency_stop(&self, ctx: &Context<'_>, drone_id: ID) -> Result<Drone> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.delay().await;

        execute(api_ctx, &drone_id, domain::DroneCommand::EmergencyStop).await
    }

    // =========================================================================
    // MISSION MUTATIONS
    // =========================================================================

    /// Create a pending mission with at least five waypoints
    async fn create_mission(&self, ctx: &Context<'_>, input: CreateMissionInput) -> Result<Mission> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.delay().await;

        let mut engine = api_ctx.engine.lock().await;
        let mission = engine
            .create_mission(input.into())
            .map_err(ApiError::from)?;

        Ok(mission.into())
    }

    /// Update name, status or route of a mission
    async fn update_mission(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateMissionInput,
    ) -> Result<Mission> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("updateMission").await?;

        let mut engine = api_ctx.engine.lock().await;
        let mission = engine
            .update_mission(&id, input.into())
            .map_err(ApiError::from)?;

        Ok(mission.into())
    }

    /// Delete a mission
    async fn delete_mission(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteMissionResult> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("deleteMission").await?;

        let mut engine = api_ctx.engine.lock().await;
        let removed = engine
            .delete_mission(&id)
            .ok_or_else(|| ApiError::from(DomainError::mission_not_found(id.as_str())))?;

        Ok(DeleteMissionResult { id: ID(removed.id) })
    }

    /// Mark a mission completed, stamping completion time and duration
    async fn complete_mission(&self, ctx: &Context<'_>, id: ID) -> Result<Mission> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.delay().await;

        let mut engine = api_ctx.engine.lock().await;
        let mission = engine.complete_mission(&id).map_err(ApiError::from)?;
        Ok(mission.into())
    }
}

async fn execute(
    api_ctx: &ApiContext,
    drone_id: &str,
    command: domain::DroneCommand,
) -> Result<Drone> {
    let mut engine = api_ctx.engine.lock().await;
    let drone = engine
        .execute_command(drone_id, command)
        .map_err(ApiError::from)?;
    Ok(drone.into())
}
