//! # Simulated Network Faults
//!
//! Latency and random request failures in front of the engine, mirroring
//! what a flaky link to a real fleet backend looks like to the dashboard.
//! The roll happens before the engine lock is taken, so a failed request
//! never touches fleet state.

use rand::Rng;
use std::time::Duration;

use crate::config::FaultConfig;
use crate::error::{ApiError, ApiResult};

/// Per-request latency and failure injector
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    config: FaultConfig,
}

impl FaultInjector {
    pub const fn new(config: FaultConfig) -> Self {
        Self { config }
    }

    pub const fn disabled() -> Self {
        Self::new(FaultConfig::disabled())
    }

    /// Sleep for the configured latency, then maybe fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TransientFault`] with probability `failure_rate`.
    pub async fn before_request(&self, operation: &'static str) -> ApiResult<()> {
        self.delay().await;

        if self.roll_failure() {
            tracing::warn!(operation, "Injected transient fault");
            return Err(ApiError::TransientFault);
        }
        Ok(())
    }

    /// Latency only, for operations that never fail.
    pub async fn delay(&self) {
        let latency = self.sample_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn sample_latency(&self) -> Duration {
        let FaultConfig { latency_min, latency_max, .. } = self.config;
        if latency_max <= latency_min {
            return latency_min;
        }
        rand::thread_rng().gen_range(latency_min..=latency_max)
    }

    fn roll_failure(&self) -> bool {
        let rate = self.config.failure_rate;
        if rate <= 0.0 || rate.is_nan() {
            return false;
        }
        rand::thread_rng().gen_bool(rate.min(1.0))
    }
}
