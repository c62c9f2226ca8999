//! Cashier API
//!
//! The atomic close: payment reconciliation, historization, live cleanup.

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders/{order_id}/close", post(handler::close))
}
