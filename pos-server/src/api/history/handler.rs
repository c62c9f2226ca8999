//! Sales history API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::HistoryView;
use shared::error::AppResult;
use shared::types::HistoryOrderId;

/// Read a closed order with its items, payments, and timeline
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<HistoryOrderId>,
) -> AppResult<Json<HistoryView>> {
    let view = state.orders.history(user.business_id, order_id)?;
    Ok(Json(view))
}
