//! Readiness endpoint with a real MongoDB connectivity check

use axum::{Json, Router, http::StatusCode, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

async fn ready(state: AppState) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async {
            if database::mongodb::check_health(&state.mongo_client).await {
                Ok(())
            } else {
                Err("MongoDB unreachable".to_string())
            }
        }),
    )];

    run_health_checks(checks).await
}

/// Creates a router with the /ready endpoint
pub fn ready_router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}
