//! MongoDB connection management: configuration, connect with retry, health.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health_detailed};

pub use mongodb::{Client, Collection, Database};
