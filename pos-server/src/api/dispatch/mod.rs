//! Dispatch API
//!
//! READY-order listings and the READY → DISPATCHED transition.

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dispatch/orders", get(handler::orders))
        .route("/api/dispatch/orders/details", get(handler::order_details))
        .route("/api/dispatch/order/{order_id}", post(handler::dispatch))
}
