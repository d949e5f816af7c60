//! Items API routes
//!
//! Wires the items domain to HTTP and adds the service version endpoint.

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use domain_items::{ItemService, ItemStore, MongoItemStore, handlers};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionProperties {
    pub version: String,
}

/// Body of `GET /item/version`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub properties: VersionProperties,
}

/// Items router backed by the configured MongoDB collection
pub fn router(state: &AppState) -> Router {
    let store = MongoItemStore::with_collection(state.db.clone(), &state.config.items_collection);
    routes(ItemService::new(store), state.config.app)
}

/// Item endpoints plus `/version`, to be nested under `/item`
pub fn routes<S: ItemStore + 'static>(service: ItemService<S>, app: AppInfo) -> Router {
    Router::new()
        .route("/version", get(version))
        .with_state(app)
        .merge(handlers::router(service))
}

/// Running service version
#[utoipa::path(
    get,
    path = "/item/version",
    tag = "Items",
    responses(
        (status = 200, description = "Service version", body = VersionResponse)
    )
)]
pub async fn version(State(app): State<AppInfo>) -> Json<VersionResponse> {
    Json(VersionResponse {
        properties: VersionProperties {
            version: app.version.to_string(),
        },
    })
}
