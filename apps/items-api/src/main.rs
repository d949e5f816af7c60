use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::MongoItemStore;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        database = config.mongodb.database(),
        collection = %config.items_collection,
        "Connecting to MongoDB"
    );

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    // Owner and auction-window indexes
    MongoItemStore::with_collection(db.clone(), &config.items_collection)
        .create_indexes()
        .await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    let server_config = state.config.server.clone();
    let mongo_client = state.mongo_client.clone();

    info!("Starting auction items API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Auction items API shutdown complete");
    Ok(())
}
