//! Domain entities
//!
//! - [`live_order`]: in-flight orders and their line items (mutable working state)
//! - [`history`]: closed orders, items, payments, timeline (immutable once written)

pub mod history;
pub mod live_order;

pub use history::{HistoricalOrder, HistoricalOrderItem, PaymentRecord, TimelineEvent};
pub use live_order::{DayLock, LiveOrder, LiveOrderItem};
