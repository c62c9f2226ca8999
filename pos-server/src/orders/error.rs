//! Order workflow errors

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::types::{BusinessId, ComboId, ItemRowId, LiveOrderId};
use thiserror::Error;

use super::storage::StorageError;

/// Errors raised by the order workflow
///
/// Precondition and validation failures are terminal for the request: the
/// caller must change state or input before retrying. Storage failures roll
/// the whole transaction back and map to a system-category code.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Day is locked")]
    DayLocked,

    #[error("Day already locked")]
    DayAlreadyLocked,

    #[error("Cannot lock day, pending orders exist")]
    OpenOrdersExist,

    #[error("Order sequence not configured for business {0}")]
    SequenceNotConfigured(BusinessId),

    #[error("Order not found: {0}")]
    OrderNotFound(LiveOrderId),

    #[error("Order {0} not found, already sent, or cancelled")]
    NotEligible(LiveOrderId),

    #[error("Order {0} not ready for dispatch")]
    NotReady(LiveOrderId),

    #[error("Order {0} not ready to close")]
    NotReadyToClose(LiveOrderId),

    #[error("No items in order {0}")]
    EmptyOrder(LiveOrderId),

    #[error("Item {0} cannot be removed (already sent to kitchen)")]
    ItemNotRemovable(ItemRowId),

    #[error("Item {0} not found or already processed")]
    ItemNotFoundOrAlreadyProcessed(ItemRowId),

    #[error("Invalid combo: {0}")]
    InvalidCombo(ComboId),

    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Discount exceeds order amount")]
    DiscountExceedsOrder,

    #[error("Discount percent cannot exceed 100")]
    InvalidPercent,

    #[error("Invalid discount value")]
    InvalidDiscountValue,

    #[error("Payment is required")]
    PaymentRequired,

    #[error("Payment amount does not match final bill amount: paid {paid}, due {due}")]
    PaymentMismatch { paid: Decimal, due: Decimal },
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<redb::CommitError> for OrderError {
    fn from(err: redb::CommitError) -> Self {
        OrderError::Storage(StorageError::from(err))
    }
}

/// Classify a storage failure into a stable error code
///
/// redb errors surface as strings; match on the usual suspects so the
/// terminal can tell "retry later" apart from "call support".
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if matches!(e, StorageError::Serialization(_)) {
        return ErrorCode::InternalError;
    }

    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc") {
        return ErrorCode::StorageFull;
    }
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    ErrorCode::SystemBusy
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error in order workflow");
                // Engine detail stays in the log, not on the wire
                AppError::new(code)
            }
            OrderError::DayLocked => AppError::new(ErrorCode::DayLocked),
            OrderError::DayAlreadyLocked => AppError::new(ErrorCode::DayAlreadyLocked),
            OrderError::OpenOrdersExist => AppError::new(ErrorCode::OpenOrdersExist),
            OrderError::SequenceNotConfigured(business_id) => {
                AppError::new(ErrorCode::SequenceNotConfigured)
                    .with_detail("business_id", business_id)
            }
            OrderError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("live_order_id", id)
            }
            OrderError::NotEligible(id) => {
                AppError::new(ErrorCode::OrderNotEligible).with_detail("live_order_id", id)
            }
            OrderError::NotReady(id) => {
                AppError::new(ErrorCode::OrderNotReady).with_detail("live_order_id", id)
            }
            OrderError::NotReadyToClose(id) => {
                AppError::new(ErrorCode::OrderNotReadyToClose).with_detail("live_order_id", id)
            }
            OrderError::EmptyOrder(id) => {
                AppError::new(ErrorCode::OrderEmpty).with_detail("live_order_id", id)
            }
            OrderError::ItemNotRemovable(id) => {
                AppError::new(ErrorCode::ItemNotRemovable).with_detail("item_row_id", id)
            }
            OrderError::ItemNotFoundOrAlreadyProcessed(id) => {
                AppError::new(ErrorCode::ItemNotFoundOrAlreadyProcessed)
                    .with_detail("item_row_id", id)
            }
            OrderError::InvalidCombo(id) => {
                AppError::new(ErrorCode::InvalidCombo).with_detail("combo_id", id)
            }
            OrderError::InvalidQuantity => AppError::new(ErrorCode::InvalidQuantity),
            OrderError::DiscountExceedsOrder => AppError::new(ErrorCode::DiscountExceedsOrder),
            OrderError::InvalidPercent => AppError::new(ErrorCode::InvalidPercent),
            OrderError::InvalidDiscountValue => AppError::new(ErrorCode::InvalidDiscountValue),
            OrderError::PaymentRequired => AppError::new(ErrorCode::PaymentRequired),
            OrderError::PaymentMismatch { paid, due } => {
                AppError::new(ErrorCode::PaymentMismatch)
                    .with_detail("paid", paid.to_string())
                    .with_detail("due", due.to_string())
            }
        }
    }
}
