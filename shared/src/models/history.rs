//! Permanent sales history
//!
//! Produced exclusively by the order closer as a single atomic unit, and
//! immutable once written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    BusinessId, ComboId, DiscountType, HistoryOrderId, ItemId, OrderType, SizeId, TenderId, UserId,
};

/// The immutable record of a completed sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalOrder {
    pub id: HistoryOrderId,
    pub business_id: BusinessId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub payment_status: String,
    pub opened_at: i64,
    pub closed_at: i64,
    pub closed_by: UserId,
    /// Subtotal of all line amounts before discount
    pub total_amount: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub discount_amount: Decimal,
    pub discounted_by: Option<UserId>,
    /// `max(total_amount - discount_amount, 0)`, what the payments settled
    pub net_amount: Decimal,
}

/// One historized line item
///
/// `rate`, the proportional `discount_amount`, and `final_amount` are
/// computed at close time and never recomputed afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalOrderItem {
    pub order_id: HistoryOrderId,
    pub item_id: ItemId,
    pub size_id: Option<SizeId>,
    pub combo_id: Option<ComboId>,
    pub qty: u32,
    pub rate: Decimal,
    pub original_rate: Decimal,
    /// Line amount before discount (`rate * qty`)
    pub amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub added_at: i64,
    pub kitchen_done_at: Option<i64>,
}

/// One settled payment against a historical order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub order_id: HistoryOrderId,
    pub tender_id: TenderId,
    pub amount: Decimal,
}

/// A lifecycle event on a historical order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub order_id: HistoryOrderId,
    pub event: String,
    pub event_time: i64,
}
