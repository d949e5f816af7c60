#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

const DEFAULT_MAX_POOL_SIZE: u32 = 100;
const DEFAULT_MIN_POOL_SIZE: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 30;

/// MongoDB connection settings
///
/// Build it by hand or, with the `config` feature, from the environment:
///
/// ```ignore
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "auction")
///     .with_app_name("items-api");
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// `mongodb://[username:password@]host[:port][/database][?options]`
    pub url: String,
    pub database: String,
    /// Reported to the server in its connection logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` using the `default` database
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, "default")
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            server_selection_timeout_secs: DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

#[cfg(feature = "config")]
fn env_with_fallback(primary: &str, fallback: &str) -> Result<String, ConfigError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| ConfigError::MissingEnvVar(format!("{} or {}", primary, fallback)))
}

/// Environment variables:
/// - `MONGODB_URL` (fallback `MONGO_URL`), required
/// - `MONGODB_DATABASE` (fallback `MONGO_DATABASE`), required
/// - `MONGODB_APP_NAME`
/// - `MONGODB_MAX_POOL_SIZE` (100), `MONGODB_MIN_POOL_SIZE` (5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (10), `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_with_fallback("MONGODB_URL", "MONGO_URL")?,
            database: env_with_fallback("MONGODB_DATABASE", "MONGO_DATABASE")?,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", DEFAULT_MAX_POOL_SIZE)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", DEFAULT_MIN_POOL_SIZE)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
            )?,
        })
    }
}
