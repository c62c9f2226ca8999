//! Order workflow manager
//!
//! One method per workflow operation. Every mutation runs inside exactly one
//! storage write transaction, so each operation is all-or-nothing and
//! serialized against every other mutation. Status transitions check their
//! expected prior status inside the transaction; a mismatch surfaces as a
//! conflict-style error and nothing is written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shared::models::{
    DayLock, HistoricalOrder, HistoricalOrderItem, LiveOrder, LiveOrderItem, PaymentRecord,
    TimelineEvent,
};
use shared::types::{
    BusinessId, ComboId, DiscountType, HistoryOrderId, ItemId, ItemRowId, KitchenStatus,
    LiveOrderId, OrderStatus, OrderType, SizeId, TenderId, UserId,
};
use shared::util::{business_date, minutes_since, now_millis};

use crate::catalog::{price_of, Catalog};
use crate::orders::error::{OrderError, OrderResult};
use crate::orders::money::{line_amount, money_eq, net_amount, round_money, split_discount};
use crate::orders::storage::{
    OrderStorage, HISTORY_ORDER_ID_KEY, ITEM_ROW_ID_KEY, LIVE_ORDER_ID_KEY,
};

// ==================== Inputs ====================

/// Payload for opening a new live order
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub payment_status: Option<String>,
}

/// Payload for adding a single line item
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub item_id: ItemId,
    pub size_id: Option<SizeId>,
    pub qty: u32,
}

/// One tendered payment submitted at close time
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInput {
    pub tender_id: TenderId,
    pub amount: Decimal,
}

// ==================== Outputs ====================

#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrder {
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderViewItem {
    pub id: ItemRowId,
    pub item_id: ItemId,
    pub item_name: Option<String>,
    pub size_name: Option<String>,
    pub price: Decimal,
    pub qty: u32,
}

/// The order-punch screen payload: resolved lines plus payable totals
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
    pub status: OrderStatus,
    pub items: Vec<OrderViewItem>,
    pub subtotal: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

/// A DISPATCHED order awaiting the cashier
#[derive(Debug, Clone, Serialize)]
pub struct DispatchedOrder {
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub payment_status: Option<String>,
    pub dispatched_at: Option<i64>,
}

/// One line of the kitchen display queue
#[derive(Debug, Clone, Serialize)]
pub struct KdsItem {
    pub id: ItemRowId,
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub item_name: Option<String>,
    pub size_name: Option<String>,
    pub qty: u32,
    pub minutes_elapsed: i64,
}

/// A READY order awaiting dispatch
#[derive(Debug, Clone, Serialize)]
pub struct ReadyOrder {
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub opened_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadyOrderLine {
    pub item_name: Option<String>,
    pub size_name: Option<String>,
    pub qty: u32,
}

/// A READY order with its lines, for the dispatch screen
#[derive(Debug, Clone, Serialize)]
pub struct ReadyOrderDetails {
    pub live_order_id: LiveOrderId,
    pub order_no: u64,
    pub order_type: OrderType,
    pub opened_at: i64,
    pub items: Vec<ReadyOrderLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscountOutcome {
    pub subtotal: Decimal,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosedOrder {
    pub order_id: HistoryOrderId,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub net_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayStatus {
    pub locked: bool,
}

/// A closed order read back from sales history
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub order: HistoricalOrder,
    pub items: Vec<HistoricalOrderItem>,
    pub payments: Vec<PaymentRecord>,
    pub timeline: Vec<TimelineEvent>,
}

// ==================== Manager ====================

/// The order workflow engine
///
/// Cheap to clone; shares the storage handle and catalog.
#[derive(Clone)]
pub struct OrdersManager {
    storage: OrderStorage,
    catalog: Arc<dyn Catalog>,
}

impl OrdersManager {
    pub fn new(storage: OrderStorage, catalog: Arc<dyn Catalog>) -> Self {
        Self { storage, catalog }
    }

    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    // ==================== Creation / sequence allocation ====================

    /// Open a new live order, allocating the next order number
    ///
    /// Duplicate "new order" taps collapse into one draft: an existing empty,
    /// uncancelled OPEN order is returned unchanged instead of allocating a
    /// new number. Otherwise the day lock is checked, the sequence row read
    /// and incremented, and the order row inserted, all in one transaction.
    pub fn create_order(
        &self,
        business_id: BusinessId,
        actor_id: UserId,
        input: NewOrder,
    ) -> OrderResult<CreatedOrder> {
        let txn = self.storage.begin_write()?;

        // Collapse duplicate blank drafts (newest first)
        let mut draft: Option<(LiveOrderId, u64, i64)> = None;
        for order in self.storage.live_orders_for_business(&txn, business_id)? {
            if order.status == OrderStatus::Open
                && order.cancelled_at.is_none()
                && !self.storage.order_has_items(&txn, order.id)?
                && draft.map(|(_, _, at)| order.opened_at > at).unwrap_or(true)
            {
                draft = Some((order.id, order.order_no, order.opened_at));
            }
        }
        if let Some((live_order_id, order_no, _)) = draft {
            return Ok(CreatedOrder {
                live_order_id,
                order_no,
            });
        }

        if self
            .storage
            .day_lock_exists(&txn, business_id, &business_date())?
        {
            return Err(OrderError::DayLocked);
        }

        let last = self
            .storage
            .get_sequence(&txn, business_id)?
            .ok_or(OrderError::SequenceNotConfigured(business_id))?;
        let order_no = last + 1;
        self.storage.set_sequence(&txn, business_id, order_no)?;

        let live_order_id = self.storage.next_id(&txn, LIVE_ORDER_ID_KEY)?;
        let order = LiveOrder {
            id: live_order_id,
            business_id,
            order_no,
            order_type: input.order_type,
            customer_name: input.customer_name,
            customer_mobile: input.customer_mobile,
            payment_status: input.payment_status,
            status: OrderStatus::Open,
            discount_type: None,
            discount_value: None,
            discount_amount: None,
            discounted_by: None,
            opened_at: now_millis(),
            dispatched_at: None,
            cancelled_at: None,
            cancel_reason: None,
            cancelled_by: None,
            created_by: actor_id,
        };
        self.storage.put_live_order(&txn, &order)?;
        txn.commit()?;

        tracing::info!(business_id, order_no, live_order_id, "Live order opened");
        Ok(CreatedOrder {
            live_order_id,
            order_no,
        })
    }

    // ==================== Item operations ====================

    /// Add one line item to a live order
    pub fn add_item(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
        input: NewItem,
    ) -> OrderResult<ItemRowId> {
        if input.qty == 0 {
            return Err(OrderError::InvalidQuantity);
        }

        let txn = self.storage.begin_write()?;
        self.require_order(&txn, business_id, order_id)?;

        let item_row_id = self.storage.next_id(&txn, ITEM_ROW_ID_KEY)?;
        let item = LiveOrderItem {
            id: item_row_id,
            live_order_id: order_id,
            item_id: input.item_id,
            size_id: input.size_id,
            combo_id: None,
            qty: input.qty,
            added_at: now_millis(),
            kitchen_status: KitchenStatus::Pending,
            kitchen_done_at: None,
            is_active: true,
        };
        self.storage.put_live_item(&txn, &item)?;
        txn.commit()?;
        Ok(item_row_id)
    }

    /// Add a combo, expanded into one line per component
    pub fn add_combo(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
        combo_id: ComboId,
        qty: u32,
    ) -> OrderResult<()> {
        if qty == 0 {
            return Err(OrderError::InvalidQuantity);
        }

        let txn = self.storage.begin_write()?;
        self.require_order(&txn, business_id, order_id)?;

        let components = self.catalog.combo_components(business_id, combo_id);
        if components.is_empty() {
            return Err(OrderError::InvalidCombo(combo_id));
        }

        let added_at = now_millis();
        for component in components {
            let item_row_id = self.storage.next_id(&txn, ITEM_ROW_ID_KEY)?;
            let item = LiveOrderItem {
                id: item_row_id,
                live_order_id: order_id,
                item_id: component.item_id,
                size_id: component.size_id,
                combo_id: Some(combo_id),
                qty: component.qty * qty,
                added_at,
                kitchen_status: KitchenStatus::Pending,
                kitchen_done_at: None,
                is_active: true,
            };
            self.storage.put_live_item(&txn, &item)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Soft-remove a line item
    ///
    /// Allowed only while the owning order is OPEN and the item is still
    /// PENDING and active; any precondition failure is `ItemNotRemovable`.
    pub fn remove_item(
        &self,
        business_id: BusinessId,
        item_row_id: ItemRowId,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        let mut item = self
            .storage
            .get_live_item(&txn, item_row_id)?
            .ok_or(OrderError::ItemNotRemovable(item_row_id))?;
        let order = self
            .storage
            .get_live_order(&txn, item.live_order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::ItemNotRemovable(item_row_id))?;

        if order.status != OrderStatus::Open || !item.is_pending() || !item.is_active {
            return Err(OrderError::ItemNotRemovable(item_row_id));
        }

        item.is_active = false;
        self.storage.put_live_item(&txn, &item)?;
        txn.commit()?;
        Ok(())
    }

    // ==================== Kitchen ====================

    /// Send an order to the kitchen: OPEN → PUNCHED
    pub fn send_to_kitchen(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_live_order(&txn, order_id)?
            .filter(|o| {
                o.business_id == business_id
                    && o.status == OrderStatus::Open
                    && o.cancelled_at.is_none()
            })
            .ok_or(OrderError::NotEligible(order_id))?;

        order.status = OrderStatus::Punched;
        self.storage.put_live_order(&txn, &order)?;
        txn.commit()?;

        tracing::info!(business_id, order_id, "Order sent to kitchen");
        Ok(())
    }

    /// Mark a kitchen item DONE; promotes the order to READY when it was the
    /// last pending active item
    ///
    /// All four steps (conditional PENDING→DONE, owner resolution, pending
    /// count, promotion) commit atomically. Two items finishing concurrently
    /// are serialized by the write transaction, so the final count of zero is
    /// observed by exactly one of them.
    pub fn mark_item_done(
        &self,
        business_id: BusinessId,
        item_row_id: ItemRowId,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        // 1. Conditionally flip the item PENDING → DONE, scoped to the business
        let mut item = self
            .storage
            .get_live_item(&txn, item_row_id)?
            .ok_or(OrderError::ItemNotFoundOrAlreadyProcessed(item_row_id))?;
        let mut order = self
            .storage
            .get_live_order(&txn, item.live_order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::ItemNotFoundOrAlreadyProcessed(item_row_id))?;
        if !item.is_pending() {
            return Err(OrderError::ItemNotFoundOrAlreadyProcessed(item_row_id));
        }

        item.kitchen_status = KitchenStatus::Done;
        item.kitchen_done_at = Some(now_millis());
        self.storage.put_live_item(&txn, &item)?;

        // 2-3. Count active items still pending for the owning order
        let pending = self
            .storage
            .items_for_order(&txn, order.id)?
            .iter()
            .filter(|i| i.is_active && i.is_pending())
            .count();

        // 4. Last one done: the order becomes READY
        if pending == 0 {
            order.status = OrderStatus::Ready;
            self.storage.put_live_order(&txn, &order)?;
            tracing::info!(business_id, order_id = order.id, "Order ready");
        }

        txn.commit()?;
        Ok(())
    }

    // ==================== Dispatch ====================

    /// Dispatch an order: READY → DISPATCHED
    pub fn dispatch_order(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_live_order(&txn, order_id)?
            .filter(|o| o.business_id == business_id && o.status == OrderStatus::Ready)
            .ok_or(OrderError::NotReady(order_id))?;

        order.status = OrderStatus::Dispatched;
        order.dispatched_at = Some(now_millis());
        self.storage.put_live_order(&txn, &order)?;
        txn.commit()?;
        Ok(())
    }

    // ==================== Discount ====================

    /// Apply or replace the order-level discount
    ///
    /// The subtotal is recomputed live on every call, so reapplying with the
    /// same inputs reproduces the amount from the then-current items. The
    /// stored amount is what the closer later treats as ground truth.
    pub fn apply_discount(
        &self,
        business_id: BusinessId,
        actor_id: UserId,
        order_id: LiveOrderId,
        discount_type: DiscountType,
        value: Decimal,
    ) -> OrderResult<DiscountOutcome> {
        if value <= Decimal::ZERO {
            return Err(OrderError::InvalidDiscountValue);
        }

        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_live_order(&txn, order_id)?
            .filter(|o| o.business_id == business_id && o.cancelled_at.is_none())
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let subtotal = self.active_subtotal(&txn, order_id, business_id)?;
        if subtotal <= Decimal::ZERO {
            return Err(OrderError::EmptyOrder(order_id));
        }

        let discount_amount = match discount_type {
            DiscountType::Value => {
                if value > subtotal {
                    return Err(OrderError::DiscountExceedsOrder);
                }
                value
            }
            DiscountType::Percent => {
                if value > Decimal::ONE_HUNDRED {
                    return Err(OrderError::InvalidPercent);
                }
                round_money(subtotal * value / Decimal::ONE_HUNDRED)
            }
        };

        order.discount_type = Some(discount_type);
        order.discount_value = Some(value);
        order.discount_amount = Some(discount_amount);
        order.discounted_by = Some(actor_id);
        self.storage.put_live_order(&txn, &order)?;
        txn.commit()?;

        Ok(DiscountOutcome {
            subtotal,
            discount_type,
            discount_value: value,
            discount_amount,
            final_amount: subtotal - discount_amount,
        })
    }

    // ==================== Close ====================

    /// Close a DISPATCHED order against its payments
    ///
    /// Snapshots the live order and its active items into sales history
    /// (order, items with proportional discounts, payments, timeline), then
    /// deletes the live subtree. One transaction: either the historical
    /// record exists and the live order is gone, or neither.
    pub fn close_order(
        &self,
        business_id: BusinessId,
        actor_id: UserId,
        order_id: LiveOrderId,
        payments: &[PaymentInput],
    ) -> OrderResult<ClosedOrder> {
        let txn = self.storage.begin_write()?;

        let order = self
            .storage
            .get_live_order(&txn, order_id)?
            .filter(|o| o.business_id == business_id && o.status == OrderStatus::Dispatched)
            .ok_or(OrderError::NotReadyToClose(order_id))?;

        let items: Vec<LiveOrderItem> = self
            .storage
            .items_for_order(&txn, order_id)?
            .into_iter()
            .filter(|i| i.is_active)
            .collect();

        let prices: Vec<Decimal> = items
            .iter()
            .map(|i| price_of(self.catalog.as_ref(), business_id, i.size_id))
            .collect();
        let line_amounts: Vec<Decimal> = items
            .iter()
            .zip(&prices)
            .map(|(i, price)| line_amount(*price, i.qty))
            .collect();
        let total_amount: Decimal = line_amounts.iter().sum();

        // The stored discount is ground truth; the request carries none
        let discount_amount = order.discount_amount_or_zero();
        let net = net_amount(total_amount, discount_amount);

        if payments.is_empty() {
            return Err(OrderError::PaymentRequired);
        }
        let paid: Decimal = payments.iter().map(|p| p.amount).sum();
        if !money_eq(paid, net) {
            return Err(OrderError::PaymentMismatch {
                paid: round_money(paid),
                due: round_money(net),
            });
        }

        let closed_at = now_millis();
        let history_id = self.storage.next_id(&txn, HISTORY_ORDER_ID_KEY)?;
        self.storage.insert_history_order(
            &txn,
            &HistoricalOrder {
                id: history_id,
                business_id,
                order_no: order.order_no,
                order_type: order.order_type,
                customer_name: order.customer_name.clone(),
                customer_mobile: order.customer_mobile.clone(),
                payment_status: "PAID".to_string(),
                opened_at: order.opened_at,
                closed_at,
                closed_by: actor_id,
                total_amount,
                discount_type: order.discount_type,
                discount_value: order.discount_value,
                discount_amount,
                discounted_by: order.discounted_by,
                net_amount: net,
            },
        )?;

        let discounts = split_discount(&line_amounts, discount_amount);
        for (line, ((item, amount), item_discount)) in items
            .iter()
            .zip(&line_amounts)
            .zip(&discounts)
            .enumerate()
        {
            let rate = prices[line];
            self.storage.insert_history_item(
                &txn,
                line as u32,
                &HistoricalOrderItem {
                    order_id: history_id,
                    item_id: item.item_id,
                    size_id: item.size_id,
                    combo_id: item.combo_id,
                    qty: item.qty,
                    rate,
                    original_rate: rate,
                    amount: *amount,
                    discount_amount: *item_discount,
                    final_amount: (*amount - *item_discount).max(Decimal::ZERO),
                    added_at: item.added_at,
                    kitchen_done_at: item.kitchen_done_at,
                },
            )?;
        }

        for (line, payment) in payments.iter().enumerate() {
            self.storage.insert_history_payment(
                &txn,
                line as u32,
                &PaymentRecord {
                    order_id: history_id,
                    tender_id: payment.tender_id,
                    amount: round_money(payment.amount),
                },
            )?;
        }

        self.storage.insert_timeline_event(
            &txn,
            0,
            &TimelineEvent {
                order_id: history_id,
                event: "CLOSED".to_string(),
                event_time: closed_at,
            },
        )?;

        self.storage.remove_items_for_order(&txn, order_id)?;
        self.storage.remove_live_order(&txn, order_id)?;
        txn.commit()?;

        tracing::info!(
            business_id,
            order_no = order.order_no,
            history_id,
            %net,
            "Order closed"
        );
        Ok(ClosedOrder {
            order_id: history_id,
            total_amount,
            discount_amount,
            net_amount: net,
        })
    }

    // ==================== Cancellation ====================

    /// Cancel a live order and delete its subtree
    ///
    /// No historical record is produced. The cancellation stamp is written
    /// before the delete inside the same transaction so an audit sink can be
    /// attached here later.
    pub fn cancel_order(
        &self,
        business_id: BusinessId,
        actor_id: UserId,
        order_id: LiveOrderId,
        reason: Option<String>,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        let mut order = self
            .storage
            .get_live_order(&txn, order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(now_millis());
        order.cancel_reason = reason;
        order.cancelled_by = Some(actor_id);
        self.storage.put_live_order(&txn, &order)?;

        self.storage.remove_items_for_order(&txn, order_id)?;
        self.storage.remove_live_order(&txn, order_id)?;
        txn.commit()?;

        tracing::info!(business_id, order_id, "Order cancelled");
        Ok(())
    }

    // ==================== Payment annotation ====================

    /// Update the payment-status annotation from the punch screen
    pub fn update_payment_status(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
        payment_status: Option<String>,
    ) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;
        let mut order = self.require_order(&txn, business_id, order_id)?;
        order.payment_status = payment_status;
        self.storage.put_live_order(&txn, &order)?;
        txn.commit()?;
        Ok(())
    }

    // ==================== Day lock ====================

    pub fn day_status(&self, business_id: BusinessId) -> OrderResult<DayStatus> {
        let locked = self
            .storage
            .day_lock_exists_read(business_id, &business_date())?;
        Ok(DayStatus { locked })
    }

    /// Lock the current business date against new orders
    pub fn lock_day(&self, business_id: BusinessId, actor_id: UserId) -> OrderResult<()> {
        let txn = self.storage.begin_write()?;

        let date = business_date();
        if self.storage.day_lock_exists(&txn, business_id, &date)? {
            return Err(OrderError::DayAlreadyLocked);
        }
        if !self
            .storage
            .live_orders_for_business(&txn, business_id)?
            .is_empty()
        {
            return Err(OrderError::OpenOrdersExist);
        }

        self.storage.insert_day_lock(
            &txn,
            &DayLock {
                business_id,
                business_date: date,
                locked_at: now_millis(),
                locked_by: actor_id,
            },
        )?;
        txn.commit()?;

        tracing::info!(business_id, "Day locked");
        Ok(())
    }

    // ==================== Read side ====================

    /// Live order view with resolved lines and payable totals
    pub fn view_order(
        &self,
        business_id: BusinessId,
        order_id: LiveOrderId,
    ) -> OrderResult<OrderView> {
        let order = self
            .storage
            .get_live_order_read(order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let mut items = Vec::new();
        let mut subtotal = Decimal::ZERO;
        for item in self.storage.items_for_order_read(order_id)? {
            if !item.is_active {
                continue;
            }
            let size = item.size_id.and_then(|s| self.catalog.size(business_id, s));
            let price = size.as_ref().map(|s| s.price).unwrap_or(Decimal::ZERO);
            subtotal += line_amount(price, item.qty);
            items.push(OrderViewItem {
                id: item.id,
                item_id: item.item_id,
                item_name: self.catalog.item_name(business_id, item.item_id),
                size_name: size.map(|s| s.name),
                price,
                qty: item.qty,
            });
        }

        let discount_amount = order.discount_amount_or_zero();
        Ok(OrderView {
            live_order_id: order.id,
            order_no: order.order_no,
            status: order.status,
            items,
            subtotal,
            discount_type: order.discount_type,
            discount_value: order.discount_value,
            discount_amount,
            final_amount: net_amount(subtotal, discount_amount),
        })
    }

    /// DISPATCHED orders awaiting the cashier, oldest dispatch first
    pub fn pending_orders(&self, business_id: BusinessId) -> OrderResult<Vec<DispatchedOrder>> {
        let mut orders: Vec<DispatchedOrder> = self
            .storage
            .live_orders_for_business_read(business_id)?
            .into_iter()
            .filter(|o| o.status == OrderStatus::Dispatched)
            .map(|o| DispatchedOrder {
                live_order_id: o.id,
                order_no: o.order_no,
                order_type: o.order_type,
                customer_name: o.customer_name,
                customer_mobile: o.customer_mobile,
                payment_status: o.payment_status,
                dispatched_at: o.dispatched_at,
            })
            .collect();
        orders.sort_by_key(|o| o.dispatched_at);
        Ok(orders)
    }

    /// Item-level kitchen queue: active PENDING items of PUNCHED orders
    pub fn kds_items(&self, business_id: BusinessId) -> OrderResult<Vec<KdsItem>> {
        let mut rows: Vec<(i64, KdsItem)> = Vec::new();
        for order in self.storage.live_orders_for_business_read(business_id)? {
            if order.status != OrderStatus::Punched || order.cancelled_at.is_some() {
                continue;
            }
            for item in self.storage.items_for_order_read(order.id)? {
                if !item.is_active || !item.is_pending() {
                    continue;
                }
                let size = item.size_id.and_then(|s| self.catalog.size(business_id, s));
                rows.push((
                    item.added_at,
                    KdsItem {
                        id: item.id,
                        live_order_id: order.id,
                        order_no: order.order_no,
                        order_type: order.order_type,
                        item_name: self.catalog.item_name(business_id, item.item_id),
                        size_name: size.map(|s| s.name),
                        qty: item.qty,
                        minutes_elapsed: minutes_since(item.added_at),
                    },
                ));
            }
        }
        rows.sort_by_key(|(added_at, _)| *added_at);
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    /// READY orders, oldest opened first
    pub fn ready_orders(&self, business_id: BusinessId) -> OrderResult<Vec<ReadyOrder>> {
        let mut orders: Vec<ReadyOrder> = self
            .storage
            .live_orders_for_business_read(business_id)?
            .into_iter()
            .filter(|o| o.status == OrderStatus::Ready)
            .map(|o| ReadyOrder {
                live_order_id: o.id,
                order_no: o.order_no,
                order_type: o.order_type,
                opened_at: o.opened_at,
            })
            .collect();
        orders.sort_by_key(|o| o.opened_at);
        Ok(orders)
    }

    /// READY orders grouped with their lines for the dispatch screen
    pub fn ready_order_details(
        &self,
        business_id: BusinessId,
    ) -> OrderResult<Vec<ReadyOrderDetails>> {
        let mut orders: Vec<LiveOrder> = self
            .storage
            .live_orders_for_business_read(business_id)?
            .into_iter()
            .filter(|o| o.status == OrderStatus::Ready)
            .collect();
        orders.sort_by_key(|o| o.order_no);

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self
                .storage
                .items_for_order_read(order.id)?
                .into_iter()
                .filter(|i| i.is_active)
                .map(|i| ReadyOrderLine {
                    item_name: self.catalog.item_name(business_id, i.item_id),
                    size_name: i
                        .size_id
                        .and_then(|s| self.catalog.size(business_id, s))
                        .map(|s| s.name),
                    qty: i.qty,
                })
                .collect();
            details.push(ReadyOrderDetails {
                live_order_id: order.id,
                order_no: order.order_no,
                order_type: order.order_type,
                opened_at: order.opened_at,
                items,
            });
        }
        Ok(details)
    }

    /// Read a closed order back from sales history
    pub fn history(
        &self,
        business_id: BusinessId,
        order_id: HistoryOrderId,
    ) -> OrderResult<HistoryView> {
        let order = self
            .storage
            .get_history_order(order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        Ok(HistoryView {
            items: self.storage.history_items(order_id)?,
            payments: self.storage.history_payments(order_id)?,
            timeline: self.storage.history_timeline(order_id)?,
            order,
        })
    }

    // ==================== Internals ====================

    fn require_order(
        &self,
        txn: &redb::WriteTransaction,
        business_id: BusinessId,
        order_id: LiveOrderId,
    ) -> OrderResult<LiveOrder> {
        self.storage
            .get_live_order(txn, order_id)?
            .filter(|o| o.business_id == business_id)
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// Subtotal over active items with live-resolved prices
    fn active_subtotal(
        &self,
        txn: &redb::WriteTransaction,
        order_id: LiveOrderId,
        business_id: BusinessId,
    ) -> OrderResult<Decimal> {
        let mut subtotal = Decimal::ZERO;
        for item in self.storage.items_for_order(txn, order_id)? {
            if item.is_active {
                let price = price_of(self.catalog.as_ref(), business_id, item.size_id);
                subtotal += line_amount(price, item.qty);
            }
        }
        Ok(subtotal)
    }
}
