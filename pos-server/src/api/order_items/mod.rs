//! Line item API
//!
//! Item and combo additions, and the OPEN-only soft removal.

mod handler;

use axum::{
    routing::{delete, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders/live/{order_id}/item", post(handler::add_item))
        .route("/api/orders/live/{order_id}/combo", post(handler::add_combo))
        .route("/api/orders/live/item/{item_row_id}", delete(handler::remove_item))
}
