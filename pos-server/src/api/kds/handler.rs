//! Kitchen display API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::KdsItem;
use shared::error::{ApiResponse, AppResult};
use shared::types::ItemRowId;

/// Items still to be prepared, oldest first
pub async fn items(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<KdsItem>>> {
    let items = state.orders.kds_items(user.business_id)?;
    Ok(Json(items))
}

/// Mark an item DONE; the order becomes READY when it was the last one
pub async fn mark_done(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_row_id): Path<ItemRowId>,
) -> AppResult<ApiResponse<()>> {
    state.orders.mark_item_done(user.business_id, item_row_id)?;
    Ok(ApiResponse::ok())
}
