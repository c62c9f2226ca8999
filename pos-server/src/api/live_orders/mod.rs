//! Live order API
//!
//! Creation (with sequence allocation), the punch-screen view, send-to-kitchen,
//! the cashier's pending list, and the payment-status annotation.

mod handler;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders/live", post(handler::create))
        .route("/api/orders/live/{order_id}", get(handler::view))
        .route(
            "/api/orders/live/{order_id}/payment",
            patch(handler::update_payment_status),
        )
        .route("/api/orders/pending", get(handler::pending))
        .route(
            "/api/orders/{order_id}/send-to-kitchen",
            post(handler::send_to_kitchen),
        )
}
