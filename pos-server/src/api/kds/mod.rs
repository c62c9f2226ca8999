//! Kitchen display API
//!
//! The item-level preparation queue and the DONE transition that drives the
//! order-readiness cascade.

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/kds/items", get(handler::items))
        .route("/api/kds/item/{item_row_id}/done", post(handler::mark_done))
}
