//! Database connectors and shared utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client, connection retry and health checks
//! - `config` - `core_config::FromEnv` support for connection settings
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};
