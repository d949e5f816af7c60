/// Error type for connector-level database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error from the MongoDB client
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The server could not be reached or refused the handshake
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(feature = "config")]
impl From<core_config::ConfigError> for DatabaseError {
    fn from(err: core_config::ConfigError) -> Self {
        DatabaseError::ConfigError(err.to_string())
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
