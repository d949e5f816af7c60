//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! - **[`server`]**: router factory with OpenAPI docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the [`ErrorResponse`] body with stable [`ErrorCode`]s
//! - **[`extractors`]**: [`JsonBody`], a JSON extractor rejecting with [`AppError`]

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::JsonBody;
