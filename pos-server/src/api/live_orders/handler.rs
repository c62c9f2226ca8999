//! Live order API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::manager::{CreatedOrder, DispatchedOrder, NewOrder, OrderView};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::types::{LiveOrderId, OrderType};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub order_type: OrderType,
    #[validate(length(max = 120))]
    pub customer_name: Option<String>,
    #[validate(length(max = 20))]
    pub customer_mobile: Option<String>,
    #[validate(length(max = 20))]
    pub payment_status: Option<String>,
}

/// Open a new live order (or return the existing blank draft)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<CreatedOrder>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let created = state.orders.create_order(
        user.business_id,
        user.user_id,
        NewOrder {
            order_type: req.order_type,
            customer_name: req.customer_name,
            customer_mobile: req.customer_mobile,
            payment_status: req.payment_status,
        },
    )?;
    Ok(Json(created))
}

/// Punch-screen view: items, subtotal, discount, payable amount
pub async fn view(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
) -> AppResult<Json<OrderView>> {
    let view = state.orders.view_order(user.business_id, order_id)?;
    Ok(Json(view))
}

/// DISPATCHED orders awaiting the cashier
pub async fn pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<DispatchedOrder>>> {
    let orders = state.orders.pending_orders(user.business_id)?;
    Ok(Json(orders))
}

/// Send an order to the kitchen: OPEN → PUNCHED
pub async fn send_to_kitchen(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
) -> AppResult<ApiResponse<()>> {
    state.orders.send_to_kitchen(user.business_id, order_id)?;
    Ok(ApiResponse::ok())
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentStatusRequest {
    #[validate(length(max = 20))]
    pub payment_status: Option<String>,
}

/// Update the payment-status annotation from the punch screen
pub async fn update_payment_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<LiveOrderId>,
    Json(req): Json<PaymentStatusRequest>,
) -> AppResult<ApiResponse<()>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state
        .orders
        .update_payment_status(user.business_id, order_id, req.payment_status)?;
    Ok(ApiResponse::ok())
}
