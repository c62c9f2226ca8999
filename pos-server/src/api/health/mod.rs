//! Health check

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;
use crate::orders::StorageStats;
use shared::error::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    storage: StorageStats,
}

/// Liveness probe; touches the database so storage trouble shows up here first
async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    let storage = state
        .storage
        .get_stats()
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(HealthStatus {
        status: "OK",
        storage,
    }))
}
