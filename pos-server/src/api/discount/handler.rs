//! Discount API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::DiscountOutcome;
use shared::error::{AppError, AppResult};
use shared::types::{DiscountType, LiveOrderId};

#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub value: Decimal,
}

/// Apply or replace the order-level discount
pub async fn apply(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<DiscountRequest>,
) -> AppResult<Json<DiscountOutcome>> {
    if !user.role.is_manager() {
        return Err(AppError::manager_required());
    }

    let outcome = state.orders.apply_discount(
        user.business_id,
        user.user_id,
        order_id,
        req.discount_type,
        req.value,
    )?;
    Ok(Json(outcome))
}
