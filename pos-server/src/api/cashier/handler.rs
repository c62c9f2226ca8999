//! Cashier API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::{ClosedOrder, PaymentInput};
use shared::error::AppResult;
use shared::types::LiveOrderId;

#[derive(Debug, Deserialize)]
pub struct CloseRequest {
    #[serde(default)]
    pub payments: Vec<PaymentInput>,
}

/// Close a DISPATCHED order against its payments
///
/// The stored discount is authoritative; the request carries only the
/// tendered payments.
pub async fn close(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<CloseRequest>,
) -> AppResult<Json<ClosedOrder>> {
    let closed = state
        .orders
        .close_order(user.business_id, user.user_id, order_id, &req.payments)?;
    Ok(Json(closed))
}
