//! Id aliases and domain enums

use serde::{Deserialize, Serialize};

pub type BusinessId = u64;
pub type UserId = u64;
pub type LiveOrderId = u64;
pub type ItemRowId = u64;
pub type ItemId = u64;
pub type SizeId = u64;
pub type ComboId = u64;
pub type TenderId = u64;
pub type HistoryOrderId = u64;

/// How the order will be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

/// Live order lifecycle status
///
/// `Open → Punched → Ready → Dispatched`. Closing removes the live row and
/// materializes a historical order instead; `Cancelled` is stamped just
/// before the cancellation delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Punched,
    Ready,
    Dispatched,
    Cancelled,
}

/// Per-item preparation status, tracked independently of order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenStatus {
    Pending,
    Done,
}

/// Discount expressed as a flat value or a percentage of the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Value,
    Percent,
}

/// Principal role resolved from the auth token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Cashier,
    Kitchen,
    Dispatch,
}

impl Role {
    #[inline]
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}
