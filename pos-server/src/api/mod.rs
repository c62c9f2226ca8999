//! HTTP API
//!
//! One module per workflow surface, each exposing a `router()`:
//!
//! - [`health`] - liveness probe
//! - [`live_orders`] - order creation, view, punch-screen operations
//! - [`order_items`] - line item and combo operations
//! - [`kds`] - kitchen display queue
//! - [`dispatch`] - dispatch screen
//! - [`cashier`] - order closing
//! - [`discount`] - manager discounts
//! - [`cancel`] - manager cancellation
//! - [`day_end`] - day lock gate
//! - [`history`] - sales history reads

pub mod cancel;
pub mod cashier;
pub mod day_end;
pub mod discount;
pub mod dispatch;
pub mod health;
pub mod history;
pub mod kds;
pub mod live_orders;
pub mod order_items;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(live_orders::router())
        .merge(order_items::router())
        .merge(kds::router())
        .merge(dispatch::router())
        .merge(cashier::router())
        .merge(discount::router())
        .merge(cancel::router())
        .merge(day_end::router())
        .merge(history::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
