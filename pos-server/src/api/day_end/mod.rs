//! Day-end API
//!
//! The day lock gate: status check (all roles) and locking (manager only).

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/day-end/status", get(handler::status))
        .route("/api/day-end/lock", post(handler::lock))
}
