//! Cancellation API (manager only)

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders/{order_id}/cancel", post(handler::cancel))
}
