//! API routes module
//!
//! This module defines all HTTP API routes for the auction items API.

pub mod health;
pub mod items;

use axum::Router;
use domain_items::handlers::BASE_PATH;

use crate::state::AppState;

/// Create all API routes
/// Note: docs, fallbacks and layers are added by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest(BASE_PATH, items::router(state))
        .merge(health::router(state.clone()))
}
