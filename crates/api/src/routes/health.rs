//! Liveness endpoint reporting service version and database reachability.
//!
//! Mounted outside `/api/v1` and open without a token.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`. Always 200; `db_healthy` reports the pool check.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// Check the pool with `SELECT 1` and report `degraded` when it fails.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = goalboard_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Routes merged at the root of the app router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
