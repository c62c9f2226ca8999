//! Dispatch API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::{ReadyOrder, ReadyOrderDetails};
use shared::error::{ApiResponse, AppResult};
use shared::types::LiveOrderId;

/// Orders ready for dispatch, oldest first
pub async fn orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReadyOrder>>> {
    let orders = state.orders.ready_orders(user.business_id)?;
    Ok(Json(orders))
}

/// Ready orders with their lines, for the dispatch screen
pub async fn order_details(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ReadyOrderDetails>>> {
    let details = state.orders.ready_order_details(user.business_id)?;
    Ok(Json(details))
}

/// Dispatch an order: READY → DISPATCHED
pub async fn dispatch(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
) -> AppResult<ApiResponse<()>> {
    state.orders.dispatch_order(user.business_id, order_id)?;
    Ok(ApiResponse::ok())
}
