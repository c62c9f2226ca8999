//! Shared types for the POS order server
//!
//! - **error**: unified error codes, `AppError`, and the `ApiResponse` envelope
//! - **types**: id aliases and domain enums (order/kitchen status, roles)
//! - **models**: live and historical order entities
//! - **util**: time helpers

pub mod error;
pub mod models;
pub mod types;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::{
    BusinessId, ComboId, DiscountType, HistoryOrderId, ItemId, ItemRowId, KitchenStatus,
    LiveOrderId, OrderStatus, OrderType, Role, SizeId, TenderId, UserId,
};
