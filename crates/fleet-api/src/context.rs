//! # API Context
//!
//! Application state and dependency injection for GraphQL resolvers.

use fleet_simulator::{FleetEngine, SharedEngine};

use crate::faults::FaultInjector;

/// Application context shared across all GraphQL resolvers
#[derive(Clone)]
pub struct ApiContext {
    /// Simulation engine, also driven by the tick loop
    pub engine: SharedEngine,

    /// Simulated latency and transient faults
    pub faults: FaultInjector,
}

impl ApiContext {
    pub const fn new(engine: SharedEngine, faults: FaultInjector) -> Self {
        Self { engine, faults }
    }

    /// Context over a private engine with faults disabled
    pub fn from_engine(engine: FleetEngine) -> Self {
        Self::new(engine.into_shared(), FaultInjector::disabled())
    }
}
