//! Day-end API handlers

use axum::{extract::State, Json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::DayStatus;
use shared::error::{ApiResponse, AppError, AppResult};

/// Whether today is locked; the punch screen polls this for every role
pub async fn status(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DayStatus>> {
    let status = state.orders.day_status(user.business_id)?;
    Ok(Json(status))
}

/// Lock today against new orders; refused while live orders remain
pub async fn lock(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<()>> {
    if !user.role.is_manager() {
        return Err(AppError::manager_required());
    }
    state.orders.lock_day(user.business_id, user.user_id)?;
    Ok(ApiResponse::ok())
}
