//! redb-based storage layer for the order workflow
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `live_orders` | `order_id` | `LiveOrder` | In-flight orders |
//! | `live_order_items` | `(order_id, item_row_id)` | `LiveOrderItem` | Line items |
//! | `live_item_index` | `item_row_id` | `order_id` | Item → order lookup |
//! | `order_sequence` | `business_id` | `u64` | Last issued order number |
//! | `day_locks` | `(business_id, date)` | `DayLock` | Day-end locks (append-only) |
//! | `orders` | `order_id` | `HistoricalOrder` | Sales history |
//! | `order_items` | `(order_id, line)` | `HistoricalOrderItem` | Historized lines |
//! | `order_payments` | `(order_id, line)` | `PaymentRecord` | Settled payments |
//! | `order_timeline` | `(order_id, line)` | `TimelineEvent` | Lifecycle events |
//! | `id_counter` | name | `u64` | Monotonic id allocation |
//!
//! # Concurrency
//!
//! redb allows a single write transaction at a time, so every multi-step
//! operation composed over one [`WriteTransaction`] is serialized against all
//! others. This is the sole serialization point of the system; it plays the
//! role a `SELECT ... FOR UPDATE` row lock plays in a SQL store.

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, ReadableTableMetadata,
    TableDefinition, WriteTransaction,
};
use shared::models::{
    DayLock, HistoricalOrder, HistoricalOrderItem, LiveOrder, LiveOrderItem, PaymentRecord,
    TimelineEvent,
};
use shared::types::{BusinessId, HistoryOrderId, ItemRowId, LiveOrderId};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const LIVE_ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("live_orders");

/// key = (live_order_id, item_row_id) so one order's lines form a contiguous range
const LIVE_ITEMS_TABLE: TableDefinition<(u64, u64), &[u8]> =
    TableDefinition::new("live_order_items");

/// item_row_id -> live_order_id, for lookups that only carry the row id
const LIVE_ITEM_INDEX_TABLE: TableDefinition<u64, u64> = TableDefinition::new("live_item_index");

/// business_id -> last issued order number; absence means "not configured"
const SEQUENCE_TABLE: TableDefinition<u64, u64> = TableDefinition::new("order_sequence");

const DAY_LOCKS_TABLE: TableDefinition<(u64, &str), &[u8]> = TableDefinition::new("day_locks");

const ORDERS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("orders");
const ORDER_ITEMS_TABLE: TableDefinition<(u64, u32), &[u8]> = TableDefinition::new("order_items");
const ORDER_PAYMENTS_TABLE: TableDefinition<(u64, u32), &[u8]> =
    TableDefinition::new("order_payments");
const ORDER_TIMELINE_TABLE: TableDefinition<(u64, u32), &[u8]> =
    TableDefinition::new("order_timeline");

const ID_COUNTER_TABLE: TableDefinition<&str, u64> = TableDefinition::new("id_counter");

pub const LIVE_ORDER_ID_KEY: &str = "live_order_id";
pub const ITEM_ROW_ID_KEY: &str = "item_row_id";
pub const HISTORY_ORDER_ID_KEY: &str = "history_order_id";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
///
/// Commits are durable as soon as `commit()` returns; the database file is
/// always in a consistent state, which matters on till hardware that gets
/// powered off without warning.
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(LIVE_ORDERS_TABLE)?;
            let _ = write_txn.open_table(LIVE_ITEMS_TABLE)?;
            let _ = write_txn.open_table(LIVE_ITEM_INDEX_TABLE)?;
            let _ = write_txn.open_table(SEQUENCE_TABLE)?;
            let _ = write_txn.open_table(DAY_LOCKS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_ITEMS_TABLE)?;
            let _ = write_txn.open_table(ORDER_PAYMENTS_TABLE)?;
            let _ = write_txn.open_table(ORDER_TIMELINE_TABLE)?;
            let _ = write_txn.open_table(ID_COUNTER_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    ///
    /// Exclusive; every multi-step operation runs inside exactly one.
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Begin a read transaction (snapshot view)
    pub fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    // ========== Id Allocation ==========

    /// Allocate the next id for the named counter (within transaction)
    pub fn next_id(&self, txn: &WriteTransaction, counter: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(ID_COUNTER_TABLE)?;
        let current = table.get(counter)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(counter, next)?;
        Ok(next)
    }

    // ========== Sequence Operations ==========

    /// Read the last issued order number for a business (within transaction)
    ///
    /// `None` means the sequence row was never configured for this business.
    pub fn get_sequence(
        &self,
        txn: &WriteTransaction,
        business_id: BusinessId,
    ) -> StorageResult<Option<u64>> {
        let table = txn.open_table(SEQUENCE_TABLE)?;
        Ok(table.get(business_id)?.map(|g| g.value()))
    }

    /// Persist the last issued order number (within transaction)
    pub fn set_sequence(
        &self,
        txn: &WriteTransaction,
        business_id: BusinessId,
        last_order_no: u64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        table.insert(business_id, last_order_no)?;
        Ok(())
    }

    /// Seed the sequence row for a business (operator / provisioning action)
    pub fn configure_sequence(
        &self,
        business_id: BusinessId,
        start_at: u64,
    ) -> StorageResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(SEQUENCE_TABLE)?;
            table.insert(business_id, start_at)?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Day Locks ==========

    /// Check for a day lock (within transaction)
    pub fn day_lock_exists(
        &self,
        txn: &WriteTransaction,
        business_id: BusinessId,
        date: &str,
    ) -> StorageResult<bool> {
        let table = txn.open_table(DAY_LOCKS_TABLE)?;
        Ok(table.get((business_id, date))?.is_some())
    }

    /// Check for a day lock (read-only)
    pub fn day_lock_exists_read(
        &self,
        business_id: BusinessId,
        date: &str,
    ) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DAY_LOCKS_TABLE)?;
        Ok(table.get((business_id, date))?.is_some())
    }

    /// Append a day lock row (within transaction); locks are never updated
    pub fn insert_day_lock(&self, txn: &WriteTransaction, lock: &DayLock) -> StorageResult<()> {
        let mut table = txn.open_table(DAY_LOCKS_TABLE)?;
        let value = serde_json::to_vec(lock)?;
        table.insert((lock.business_id, lock.business_date.as_str()), value.as_slice())?;
        Ok(())
    }

    // ========== Live Orders ==========

    /// Insert or overwrite a live order (within transaction)
    pub fn put_live_order(&self, txn: &WriteTransaction, order: &LiveOrder) -> StorageResult<()> {
        let mut table = txn.open_table(LIVE_ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id, value.as_slice())?;
        Ok(())
    }

    /// Get a live order (within transaction)
    pub fn get_live_order(
        &self,
        txn: &WriteTransaction,
        order_id: LiveOrderId,
    ) -> StorageResult<Option<LiveOrder>> {
        let table = txn.open_table(LIVE_ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a live order (read-only)
    pub fn get_live_order_read(
        &self,
        order_id: LiveOrderId,
    ) -> StorageResult<Option<LiveOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LIVE_ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Remove a live order row (within transaction)
    pub fn remove_live_order(
        &self,
        txn: &WriteTransaction,
        order_id: LiveOrderId,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(LIVE_ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    /// All live orders for a business (within transaction)
    pub fn live_orders_for_business(
        &self,
        txn: &WriteTransaction,
        business_id: BusinessId,
    ) -> StorageResult<Vec<LiveOrder>> {
        let table = txn.open_table(LIVE_ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: LiveOrder = serde_json::from_slice(value.value())?;
            if order.business_id == business_id {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    /// All live orders for a business (read-only)
    pub fn live_orders_for_business_read(
        &self,
        business_id: BusinessId,
    ) -> StorageResult<Vec<LiveOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LIVE_ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: LiveOrder = serde_json::from_slice(value.value())?;
            if order.business_id == business_id {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    // ========== Live Order Items ==========

    /// Insert or overwrite a line item (within transaction), maintaining the index
    pub fn put_live_item(&self, txn: &WriteTransaction, item: &LiveOrderItem) -> StorageResult<()> {
        let mut table = txn.open_table(LIVE_ITEMS_TABLE)?;
        let value = serde_json::to_vec(item)?;
        table.insert((item.live_order_id, item.id), value.as_slice())?;
        drop(table);

        let mut index = txn.open_table(LIVE_ITEM_INDEX_TABLE)?;
        index.insert(item.id, item.live_order_id)?;
        Ok(())
    }

    /// Look up a line item by its row id alone (within transaction)
    pub fn get_live_item(
        &self,
        txn: &WriteTransaction,
        item_row_id: ItemRowId,
    ) -> StorageResult<Option<LiveOrderItem>> {
        let index = txn.open_table(LIVE_ITEM_INDEX_TABLE)?;
        let order_id = match index.get(item_row_id)? {
            Some(g) => g.value(),
            None => return Ok(None),
        };
        drop(index);

        let table = txn.open_table(LIVE_ITEMS_TABLE)?;
        match table.get((order_id, item_row_id))? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All line items of an order (within transaction), in insertion order
    pub fn items_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: LiveOrderId,
    ) -> StorageResult<Vec<LiveOrderItem>> {
        let table = txn.open_table(LIVE_ITEMS_TABLE)?;
        let mut items = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// All line items of an order (read-only), in insertion order
    pub fn items_for_order_read(
        &self,
        order_id: LiveOrderId,
    ) -> StorageResult<Vec<LiveOrderItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LIVE_ITEMS_TABLE)?;
        let mut items = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Whether the order has any line items at all, active or not
    pub fn order_has_items(
        &self,
        txn: &WriteTransaction,
        order_id: LiveOrderId,
    ) -> StorageResult<bool> {
        let table = txn.open_table(LIVE_ITEMS_TABLE)?;
        let mut range = table.range((order_id, 0u64)..=(order_id, u64::MAX))?;
        Ok(range.next().transpose()?.is_some())
    }

    /// Hard-delete every line item of an order (within transaction)
    pub fn remove_items_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: LiveOrderId,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(LIVE_ITEMS_TABLE)?;

        let mut row_ids: Vec<u64> = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (key, _value) = result?;
            row_ids.push(key.value().1);
        }
        for row_id in &row_ids {
            table.remove((order_id, *row_id))?;
        }
        drop(table);

        let mut index = txn.open_table(LIVE_ITEM_INDEX_TABLE)?;
        for row_id in &row_ids {
            index.remove(*row_id)?;
        }
        Ok(())
    }

    // ========== Sales History ==========

    /// Insert a historical order (within transaction)
    pub fn insert_history_order(
        &self,
        txn: &WriteTransaction,
        order: &HistoricalOrder,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id, value.as_slice())?;
        Ok(())
    }

    /// Insert a historized line item at the given line number (within transaction)
    pub fn insert_history_item(
        &self,
        txn: &WriteTransaction,
        line: u32,
        item: &HistoricalOrderItem,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ORDER_ITEMS_TABLE)?;
        let value = serde_json::to_vec(item)?;
        table.insert((item.order_id, line), value.as_slice())?;
        Ok(())
    }

    /// Insert a settled payment at the given line number (within transaction)
    pub fn insert_history_payment(
        &self,
        txn: &WriteTransaction,
        line: u32,
        payment: &PaymentRecord,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ORDER_PAYMENTS_TABLE)?;
        let value = serde_json::to_vec(payment)?;
        table.insert((payment.order_id, line), value.as_slice())?;
        Ok(())
    }

    /// Append a timeline event (within transaction)
    pub fn insert_timeline_event(
        &self,
        txn: &WriteTransaction,
        line: u32,
        event: &TimelineEvent,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ORDER_TIMELINE_TABLE)?;
        let value = serde_json::to_vec(event)?;
        table.insert((event.order_id, line), value.as_slice())?;
        Ok(())
    }

    /// Read a historical order
    pub fn get_history_order(
        &self,
        order_id: HistoryOrderId,
    ) -> StorageResult<Option<HistoricalOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Read the historized line items of an order
    pub fn history_items(
        &self,
        order_id: HistoryOrderId,
    ) -> StorageResult<Vec<HistoricalOrderItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_ITEMS_TABLE)?;
        let mut items = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Read the settled payments of an order
    pub fn history_payments(
        &self,
        order_id: HistoryOrderId,
    ) -> StorageResult<Vec<PaymentRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_PAYMENTS_TABLE)?;
        let mut payments = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            payments.push(serde_json::from_slice(value.value())?);
        }
        Ok(payments)
    }

    /// Read the timeline of an order
    pub fn history_timeline(
        &self,
        order_id: HistoryOrderId,
    ) -> StorageResult<Vec<TimelineEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_TIMELINE_TABLE)?;
        let mut events = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            events.push(serde_json::from_slice(value.value())?);
        }
        Ok(events)
    }

    // ========== Statistics ==========

    /// Get storage statistics
    pub fn get_stats(&self) -> StorageResult<StorageStats> {
        let read_txn = self.db.begin_read()?;

        let live_orders = read_txn.open_table(LIVE_ORDERS_TABLE)?;
        let live_items = read_txn.open_table(LIVE_ITEMS_TABLE)?;
        let history = read_txn.open_table(ORDERS_TABLE)?;
        let locks = read_txn.open_table(DAY_LOCKS_TABLE)?;

        Ok(StorageStats {
            live_order_count: live_orders.len()?,
            live_item_count: live_items.len()?,
            history_order_count: history.len()?,
            day_lock_count: locks.len()?,
        })
    }
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageStats {
    pub live_order_count: u64,
    pub live_item_count: u64,
    pub history_order_count: u64,
    pub day_lock_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::types::{KitchenStatus, OrderStatus, OrderType};
    use shared::util::now_millis;

    fn create_test_order(id: LiveOrderId, business_id: BusinessId, order_no: u64) -> LiveOrder {
        LiveOrder {
            id,
            business_id,
            order_no,
            order_type: OrderType::DineIn,
            customer_name: None,
            customer_mobile: None,
            payment_status: None,
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
            created_by: 1,
        }
    }

    fn create_test_item(id: ItemRowId, order_id: LiveOrderId) -> LiveOrderItem {
        LiveOrderItem {
            id,
            live_order_id: order_id,
            item_id: 100,
            size_id: Some(1),
            combo_id: None,
            qty: 1,
            added_at: now_millis(),
            kitchen_status: KitchenStatus::Pending,
            kitchen_done_at: None,
            is_active: true,
        }
    }

    #[test]
    fn test_id_allocation_is_monotonic() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        let id1 = storage.next_id(&txn, LIVE_ORDER_ID_KEY).unwrap();
        let id2 = storage.next_id(&txn, LIVE_ORDER_ID_KEY).unwrap();
        txn.commit().unwrap();

        assert_eq!(id1, 1);
        assert_eq!(id2, 2);

        // Counters are independent per name
        let txn = storage.begin_write().unwrap();
        let item_id = storage.next_id(&txn, ITEM_ROW_ID_KEY).unwrap();
        txn.commit().unwrap();
        assert_eq!(item_id, 1);
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pos.db");
        {
            let storage = OrderStorage::open(&path).unwrap();
            storage.configure_sequence(1, 41).unwrap();
        }

        // Reopen: committed state survives the handle being dropped
        let storage = OrderStorage::open(&path).unwrap();
        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.get_sequence(&txn, 1).unwrap(), Some(41));
    }

    #[test]
    fn test_sequence_not_configured_reads_none() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        assert!(storage.get_sequence(&txn, 1).unwrap().is_none());
    }

    #[test]
    fn test_sequence_configure_and_increment() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.configure_sequence(1, 0).unwrap();

        let txn = storage.begin_write().unwrap();
        let last = storage.get_sequence(&txn, 1).unwrap().unwrap();
        storage.set_sequence(&txn, 1, last + 1).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.get_sequence(&txn, 1).unwrap(), Some(1));

        // Per-business rows are independent
        assert!(storage.get_sequence(&txn, 2).unwrap().is_none());
    }

    #[test]
    fn test_live_order_roundtrip() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let order = create_test_order(1, 10, 101);

        let txn = storage.begin_write().unwrap();
        storage.put_live_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_live_order_read(1).unwrap().unwrap();
        assert_eq!(loaded.order_no, 101);
        assert_eq!(loaded.status, OrderStatus::Open);

        let txn = storage.begin_write().unwrap();
        storage.remove_live_order(&txn, 1).unwrap();
        txn.commit().unwrap();

        assert!(storage.get_live_order_read(1).unwrap().is_none());
    }

    #[test]
    fn test_live_orders_scoped_by_business() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_live_order(&txn, &create_test_order(1, 10, 1)).unwrap();
        storage.put_live_order(&txn, &create_test_order(2, 10, 2)).unwrap();
        storage.put_live_order(&txn, &create_test_order(3, 20, 1)).unwrap();
        txn.commit().unwrap();

        let orders = storage.live_orders_for_business_read(10).unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.business_id == 10));
    }

    #[test]
    fn test_item_index_lookup() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_live_order(&txn, &create_test_order(1, 10, 1)).unwrap();
        storage.put_live_item(&txn, &create_test_item(7, 1)).unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let item = storage.get_live_item(&txn, 7).unwrap().unwrap();
        assert_eq!(item.live_order_id, 1);
        assert!(storage.get_live_item(&txn, 8).unwrap().is_none());
    }

    #[test]
    fn test_items_range_is_per_order() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_live_item(&txn, &create_test_item(1, 1)).unwrap();
        storage.put_live_item(&txn, &create_test_item(2, 1)).unwrap();
        storage.put_live_item(&txn, &create_test_item(3, 2)).unwrap();
        txn.commit().unwrap();

        let items = storage.items_for_order_read(1).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_remove_items_cleans_index() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_live_item(&txn, &create_test_item(1, 1)).unwrap();
        storage.put_live_item(&txn, &create_test_item(2, 1)).unwrap();
        storage.remove_items_for_order(&txn, 1).unwrap();
        txn.commit().unwrap();

        assert!(storage.items_for_order_read(1).unwrap().is_empty());
        let txn = storage.begin_write().unwrap();
        assert!(storage.get_live_item(&txn, 1).unwrap().is_none());
        assert!(storage.get_live_item(&txn, 2).unwrap().is_none());
    }

    #[test]
    fn test_order_has_items() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        assert!(!storage.order_has_items(&txn, 1).unwrap());
        storage.put_live_item(&txn, &create_test_item(1, 1)).unwrap();
        assert!(storage.order_has_items(&txn, 1).unwrap());
    }

    #[test]
    fn test_day_lock_roundtrip() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let lock = DayLock {
            business_id: 10,
            business_date: "2025-06-01".to_string(),
            locked_at: now_millis(),
            locked_by: 1,
        };

        let txn = storage.begin_write().unwrap();
        assert!(!storage.day_lock_exists(&txn, 10, "2025-06-01").unwrap());
        storage.insert_day_lock(&txn, &lock).unwrap();
        assert!(storage.day_lock_exists(&txn, 10, "2025-06-01").unwrap());
        txn.commit().unwrap();

        assert!(storage.day_lock_exists_read(10, "2025-06-01").unwrap());
        assert!(!storage.day_lock_exists_read(10, "2025-06-02").unwrap());
        assert!(!storage.day_lock_exists_read(11, "2025-06-01").unwrap());
    }

    #[test]
    fn test_history_tables_roundtrip() {
        use rust_decimal::Decimal;
        let storage = OrderStorage::open_in_memory().unwrap();

        let order = HistoricalOrder {
            id: 1,
            business_id: 10,
            order_no: 42,
            order_type: OrderType::DineIn,
            customer_name: None,
            customer_mobile: None,
            payment_status: "PAID".to_string(),
            opened_at: 1000,
            closed_at: 2000,
            closed_by: 1,
            total_amount: Decimal::new(20000, 2),
            discount_type: None,
            discount_value: None,
            discount_amount: Decimal::ZERO,
            discounted_by: None,
            net_amount: Decimal::new(20000, 2),
        };
        let item = HistoricalOrderItem {
            order_id: 1,
            item_id: 100,
            size_id: Some(1),
            combo_id: None,
            qty: 2,
            rate: Decimal::new(10000, 2),
            original_rate: Decimal::new(10000, 2),
            amount: Decimal::new(20000, 2),
            discount_amount: Decimal::ZERO,
            final_amount: Decimal::new(20000, 2),
            added_at: 1000,
            kitchen_done_at: Some(1500),
        };
        let payment = PaymentRecord {
            order_id: 1,
            tender_id: 1,
            amount: Decimal::new(20000, 2),
        };
        let event = TimelineEvent {
            order_id: 1,
            event: "CLOSED".to_string(),
            event_time: 2000,
        };

        let txn = storage.begin_write().unwrap();
        storage.insert_history_order(&txn, &order).unwrap();
        storage.insert_history_item(&txn, 0, &item).unwrap();
        storage.insert_history_payment(&txn, 0, &payment).unwrap();
        storage.insert_timeline_event(&txn, 0, &event).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_history_order(1).unwrap().unwrap();
        assert_eq!(loaded.net_amount, Decimal::new(20000, 2));
        assert_eq!(storage.history_items(1).unwrap().len(), 1);
        assert_eq!(storage.history_payments(1).unwrap().len(), 1);
        let timeline = storage.history_timeline(1).unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].event, "CLOSED");
    }

    #[test]
    fn test_stats() {
        let storage = OrderStorage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage.put_live_order(&txn, &create_test_order(1, 10, 1)).unwrap();
        storage.put_live_item(&txn, &create_test_item(1, 1)).unwrap();
        txn.commit().unwrap();

        let stats = storage.get_stats().unwrap();
        assert_eq!(stats.live_order_count, 1);
        assert_eq!(stats.live_item_count, 1);
        assert_eq!(stats.history_order_count, 0);
    }
}
