//! Application state management.
//!
//! This module defines the shared application state passed to request handlers.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the MongoDB client and database share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, also used by the readiness probe
    pub mongo_client: Client,
    /// Database holding the items collection
    pub db: Database,
}
