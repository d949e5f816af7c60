use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;
use domain_items::mongodb::ITEMS_COLLECTION;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding item documents (`MONGODB_COLLECTION`)
    pub items_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
            items_collection: env_or_default("MONGODB_COLLECTION", ITEMS_COLLECTION),
        })
    }
}
