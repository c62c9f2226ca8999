//! Live (in-flight) order entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    BusinessId, ComboId, DiscountType, ItemId, ItemRowId, KitchenStatus, LiveOrderId, OrderStatus,
    OrderType, SizeId, UserId,
};

/// An order not yet historized
///
/// Order numbers are unique and strictly increasing per business. The stored
/// `discount_amount` is recomputed whenever the discount is (re)applied and
/// is authoritative at close time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveOrder {
    pub id: LiveOrderId,
    pub business_id: BusinessId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    /// Free-form payment annotation from the punch screen (e.g. "PAID", "PENDING")
    pub payment_status: Option<String>,
    pub status: OrderStatus,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub discounted_by: Option<UserId>,
    pub opened_at: i64,
    pub dispatched_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    pub cancel_reason: Option<String>,
    pub cancelled_by: Option<UserId>,
    pub created_by: UserId,
}

impl LiveOrder {
    /// Stored discount amount, zero when no discount has been applied
    pub fn discount_amount_or_zero(&self) -> Decimal {
        self.discount_amount.unwrap_or(Decimal::ZERO)
    }
}

/// One line of a live order: a single menu item + size, or a component
/// expanded from a combo (`combo_id` set)
///
/// Removal is a soft delete (`is_active = false`) and is only permitted while
/// the owning order is OPEN and the item is still PENDING. After that the
/// only mutation is the PENDING → DONE kitchen transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveOrderItem {
    pub id: ItemRowId,
    pub live_order_id: LiveOrderId,
    pub item_id: ItemId,
    pub size_id: Option<SizeId>,
    pub combo_id: Option<ComboId>,
    pub qty: u32,
    pub added_at: i64,
    pub kitchen_status: KitchenStatus,
    pub kitchen_done_at: Option<i64>,
    pub is_active: bool,
}

impl LiveOrderItem {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.kitchen_status == KitchenStatus::Pending
    }
}

/// One row per (business, date) marking that date closed to new orders
///
/// Append-only, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLock {
    pub business_id: BusinessId,
    pub business_date: String,
    pub locked_at: i64,
    pub locked_by: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> LiveOrder {
        LiveOrder {
            id: 1,
            business_id: 10,
            order_no: 101,
            order_type: OrderType::DineIn,
            customer_name: None,
            customer_mobile: None,
            payment_status: None,
            status: OrderStatus::Open,
            discount_type: None,
            discount_value: None,
            discount_amount: None,
            discounted_by: None,
            opened_at: 0,
            dispatched_at: None,
            cancelled_at: None,
            cancel_reason: None,
            cancelled_by: None,
            created_by: 7,
        }
    }

    #[test]
    fn test_discount_amount_or_zero() {
        let mut order = sample_order();
        assert_eq!(order.discount_amount_or_zero(), Decimal::ZERO);

        order.discount_amount = Some(Decimal::new(5000, 2));
        assert_eq!(order.discount_amount_or_zero(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_live_order_serde_roundtrip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let parsed: LiveOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, order.id);
        assert_eq!(parsed.order_no, order.order_no);
        assert_eq!(parsed.status, OrderStatus::Open);
    }

    #[test]
    fn test_item_is_pending() {
        let item = LiveOrderItem {
            id: 1,
            live_order_id: 1,
            item_id: 5,
            size_id: None,
            combo_id: None,
            qty: 2,
            added_at: 0,
            kitchen_status: KitchenStatus::Pending,
            kitchen_done_at: None,
            is_active: true,
        };
        assert!(item.is_pending());

        let done = LiveOrderItem {
            kitchen_status: KitchenStatus::Done,
            kitchen_done_at: Some(1),
            ..item
        };
        assert!(!done.is_pending());
    }
}
