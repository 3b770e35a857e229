//! # GraphQL Query Resolver
//!
//! Read operations for the fleet API.

use async_graphql::{Context, ID, Object, Result};

use crate::context::ApiContext;
use crate::schema::*;
use fleet_domain as domain;

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    // =========================================================================
    // DRONE QUERIES
    // =========================================================================

    /// List drones, optionally filtered by status, search text and battery range
    async fn drones(
        &self,
        ctx: &Context<'_>,
        filter: Option<DroneFilterInput>,
    ) -> Result<Vec<Drone>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("drones").await?;

        let filters = filter.map(domain::DroneFilters::from).unwrap_or_default();
        tracing::debug!(?filters, "Listing drones");

        let engine = api_ctx.engine.lock().await;
        Ok(engine.drones(&filters).into_iter().map(Drone::from).collect())
    }

    /// Get a single drone by id
    async fn drone(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Drone>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("drone").await?;

        let engine = api_ctx.engine.lock().await;
        Ok(engine.drone(&id).map(Drone::from))
    }

    // =========================================================================
    // MISSION QUERIES
    // =========================================================================

    /// List missions newest first, optionally for one drone
    async fn missions(&self, ctx: &Context<'_>, drone_id: Option<ID>) -> Result<Vec<Mission>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.before_request("missions").await?;

        let engine = api_ctx.engine.lock().await;
        Ok(engine
            .missions(drone_id.as_deref().map(String::as_str))
            .into_iter()
            .map(Mission::from)
            .collect())
    }

    /// Get a single mission by id
    async fn mission(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Mission>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.delay().await;

        let engine = api_ctx.engine.lock().await;
        Ok(engine.mission(&id).map(Mission::from))
    }

    // =========================================================================
    // TELEMETRY QUERIES
    // =========================================================================

    /// Latest telemetry for one drone
    async fn telemetry(&self, ctx: &Context<'_>, drone_id: ID) -> Result<Option<Telemetry>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let engine = api_ctx.engine.lock().await;
        Ok(engine.telemetry(&drone_id).map(Telemetry::from))
    }

    /// Latest telemetry for the whole fleet, in fleet order
    async fn all_telemetry(&self, ctx: &Context<'_>) -> Result<Vec<Telemetry>> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let engine = api_ctx.engine.lock().await;
        Ok(engine.all_telemetry().into_iter().map(Telemetry::from).collect())
    }

    // =========================================================================
    // ANALYTICS QUERIES
    // =========================================================================

    /// Fleet-wide flight statistics
    async fn stats(&self, ctx: &Context<'_>) -> Result<FlightStats> {
        let api_ctx = ctx.data::<ApiContext>()?;
        api_ctx.faults.delay().await;

        let engine = api_ctx.engine.lock().await;
        Ok(engine.stats().into())
    }

    /// Number of simulation ticks applied so far
    async fn tick(&self, ctx: &Context<'_>) -> Result<i64> {
        let api_ctx = ctx.data::<ApiContext>()?;
        let engine = api_ctx.engine.lock().await;
        Ok(i64::try_from(engine.tick_count()).unwrap_or(i64::MAX))
    }
}
