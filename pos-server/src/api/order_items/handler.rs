//! Line item API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::NewItem;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::types::{ComboId, ItemId, ItemRowId, LiveOrderId, SizeId};

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    pub item_id: ItemId,
    pub size_id: Option<SizeId>,
    #[validate(range(min = 1))]
    pub qty: u32,
}

#[derive(Debug, Serialize)]
pub struct AddedItem {
    pub id: ItemRowId,
}

/// Add one line item to a live order
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<AddedItem>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let id = state.orders.add_item(
        user.business_id,
        order_id,
        NewItem {
            item_id: req.item_id,
            size_id: req.size_id,
            qty: req.qty,
        },
    )?;
    Ok(Json(AddedItem { id }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddComboRequest {
    pub combo_id: ComboId,
    #[validate(range(min = 1))]
    pub qty: u32,
}

/// Add a combo, expanded into one line per component
pub async fn add_combo(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<AddComboRequest>,
) -> AppResult<ApiResponse<()>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .orders
        .add_combo(user.business_id, order_id, req.combo_id, req.qty)?;
    Ok(ApiResponse::ok())
}

/// Soft-remove a line item (OPEN orders, PENDING items only)
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_row_id): Path<ItemRowId>,
) -> AppResult<ApiResponse<()>> {
    state.orders.remove_item(user.business_id, item_row_id)?;
    Ok(ApiResponse::ok())
}
