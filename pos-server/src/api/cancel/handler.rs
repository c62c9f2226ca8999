//! Cancellation API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::types::LiveOrderId;

#[derive(Debug, Deserialize, Validate)]
pub struct CancelRequest {
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// Cancel a live order; its rows are removed and no history is written
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<CancelRequest>,
) -> AppResult<ApiResponse<()>> {
    if !user.role.is_manager() {
        return Err(AppError::manager_required());
    }
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state
        .orders
        .cancel_order(user.business_id, user.user_id, order_id, req.reason)?;
    Ok(ApiResponse::ok())
}
