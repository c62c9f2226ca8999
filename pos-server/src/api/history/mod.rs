//! Sales history API
//!
//! Read-only access to closed orders. All mutations go through the closer.

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders/history/{order_id}", get(handler::get_by_id))
}
