//! # Drone Fleet GraphQL API
//!
//! GraphQL query/action layer over the simulated drone fleet.
//!
//! ## Features
//!
//! - **Fleet Queries**: drones with filters, missions, telemetry, fleet stats
//! - **Operator Actions**: status overrides, flight commands, emergency stop
//! - **Mission Planning**: create, update, complete and delete missions
//! - **Fault Injection**: optional latency and transient failures per request
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │              (GraphQL Endpoint + Playground)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                async-graphql Schema                         │
//! │                 (QueryRoot, MutationRoot)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ApiContext                               │
//! │             (FaultInjector, SharedEngine)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │          FleetEngine  ◄──── tick loop (run_simulation)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod error;
pub mod faults;
pub mod resolvers;
pub mod schema;

use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, FaultConfig};
pub use context::ApiContext;
pub use error::{ApiError, ApiResult};
pub use faults::FaultInjector;
pub use resolvers::{MutationRoot, QueryRoot};

/// GraphQL schema type
pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with context and query limits
pub fn build_schema(ctx: ApiContext, config: &Config) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ctx)
        .limit_depth(config.max_query_depth)
        .limit_complexity(config.max_query_complexity)
        .finish()
}

/// Application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: ApiSchema,
}

/// GraphQL endpoint handler
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphQL Playground HTML
pub async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}

/// Build the Axum router
pub fn build_router(schema: ApiSchema, config: &Config) -> Router {
    let state = AppState { schema };

    Router::new()
        // GraphQL endpoints
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "Drone Fleet Simulator API" }))
        // State and middleware
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
