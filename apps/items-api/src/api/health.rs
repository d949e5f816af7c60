//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

/// Create the readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - 503 until MongoDB answers a ping
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let mongodb: HealthCheckFuture = Box::pin(async move {
        let status = database::mongodb::check_health_detailed(&state.mongo_client).await;
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
