//! Unified error codes for the POS order server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Business-day and configuration errors
//! - 4xxx: Order lifecycle errors
//! - 5xxx: Payment and discount errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the terminal frontends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Manager role required
    ManagerRequired = 2002,

    // ==================== 3xxx: Business day / configuration ====================
    /// Day is locked, no new orders
    DayLocked = 3001,
    /// Day is already locked
    DayAlreadyLocked = 3002,
    /// Live orders still in flight
    OpenOrdersExist = 3003,
    /// Order sequence not configured for the business
    SequenceNotConfigured = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order not eligible for send-to-kitchen
    OrderNotEligible = 4002,
    /// Order not ready for dispatch
    OrderNotReady = 4003,
    /// Order not ready to close
    OrderNotReadyToClose = 4004,
    /// Order has no items
    OrderEmpty = 4005,
    /// Item cannot be removed
    ItemNotRemovable = 4006,
    /// Kitchen item not found or already processed
    ItemNotFoundOrAlreadyProcessed = 4007,
    /// Combo not found or has no components
    InvalidCombo = 4008,
    /// Quantity must be a positive integer
    InvalidQuantity = 4009,

    // ==================== 5xxx: Payment / discount ====================
    /// Payment is required to close an order
    PaymentRequired = 5001,
    /// Payments do not match the net payable amount
    PaymentMismatch = 5002,
    /// Discount exceeds order amount
    DiscountExceedsOrder = 5101,
    /// Discount percent cannot exceed 100
    InvalidPercent = 5102,
    /// Discount value must be positive
    InvalidDiscountValue = 5103,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ManagerRequired => "Manager authorization required",

            // Business day / configuration
            ErrorCode::DayLocked => "Day is locked",
            ErrorCode::DayAlreadyLocked => "Day already locked",
            ErrorCode::OpenOrdersExist => "Cannot lock day, pending orders exist",
            ErrorCode::SequenceNotConfigured => "Order sequence not configured",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderNotEligible => "Order not found, already sent, or cancelled",
            ErrorCode::OrderNotReady => "Order not ready for dispatch",
            ErrorCode::OrderNotReadyToClose => "Order not ready to close",
            ErrorCode::OrderEmpty => "No items in order",
            ErrorCode::ItemNotRemovable => "Item cannot be removed (already sent to kitchen)",
            ErrorCode::ItemNotFoundOrAlreadyProcessed => "Item not found or already processed",
            ErrorCode::InvalidCombo => "Invalid combo",
            ErrorCode::InvalidQuantity => "Quantity must be a positive integer",

            // Payment / discount
            ErrorCode::PaymentRequired => "Payment is required",
            ErrorCode::PaymentMismatch => "Payment amount does not match final bill amount",
            ErrorCode::DiscountExceedsOrder => "Discount exceeds order amount",
            ErrorCode::InvalidPercent => "Discount percent cannot exceed 100",
            ErrorCode::InvalidDiscountValue => "Invalid discount value",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }

    /// Get the HTTP status code for this error code
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::NotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::ItemNotFoundOrAlreadyProcessed => StatusCode::NOT_FOUND,

            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,

            ErrorCode::PermissionDenied | ErrorCode::ManagerRequired | ErrorCode::DayLocked => {
                StatusCode::FORBIDDEN
            }

            ErrorCode::SequenceNotConfigured
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::StorageCorrupted
            | ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            ErrorCode::StorageFull => StatusCode::INSUFFICIENT_STORAGE,
            ErrorCode::SystemBusy => StatusCode::SERVICE_UNAVAILABLE,

            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ManagerRequired),

            // Business day / configuration
            3001 => Ok(ErrorCode::DayLocked),
            3002 => Ok(ErrorCode::DayAlreadyLocked),
            3003 => Ok(ErrorCode::OpenOrdersExist),
            3004 => Ok(ErrorCode::SequenceNotConfigured),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderNotEligible),
            4003 => Ok(ErrorCode::OrderNotReady),
            4004 => Ok(ErrorCode::OrderNotReadyToClose),
            4005 => Ok(ErrorCode::OrderEmpty),
            4006 => Ok(ErrorCode::ItemNotRemovable),
            4007 => Ok(ErrorCode::ItemNotFoundOrAlreadyProcessed),
            4008 => Ok(ErrorCode::InvalidCombo),
            4009 => Ok(ErrorCode::InvalidQuantity),

            // Payment / discount
            5001 => Ok(ErrorCode::PaymentRequired),
            5002 => Ok(ErrorCode::PaymentMismatch),
            5101 => Ok(ErrorCode::DiscountExceedsOrder),
            5102 => Ok(ErrorCode::InvalidPercent),
            5103 => Ok(ErrorCode::InvalidDiscountValue),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9401 => Ok(ErrorCode::StorageFull),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ManagerRequired.code(), 2002);
        assert_eq!(ErrorCode::DayLocked.code(), 3001);
        assert_eq!(ErrorCode::SequenceNotConfigured.code(), 3004);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::OrderNotReadyToClose.code(), 4004);
        assert_eq!(ErrorCode::ItemNotFoundOrAlreadyProcessed.code(), 4007);
        assert_eq!(ErrorCode::PaymentMismatch.code(), 5002);
        assert_eq!(ErrorCode::DiscountExceedsOrder.code(), 5101);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::SystemBusy.code(), 9404);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(3001), Ok(ErrorCode::DayLocked));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::OrderNotFound));
        assert_eq!(ErrorCode::try_from(5002), Ok(ErrorCode::PaymentMismatch));
        assert_eq!(ErrorCode::try_from(9404), Ok(ErrorCode::SystemBusy));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4100), Err(InvalidErrorCode(4100)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ItemNotFoundOrAlreadyProcessed.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::DayLocked.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::ManagerRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::SequenceNotConfigured.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::PaymentMismatch.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::OrderNotReadyToClose.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::OrderNotFound).unwrap(),
            "4001"
        );
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::OrderNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::DayLocked,
            ErrorCode::OrderNotEligible,
            ErrorCode::PaymentRequired,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }
}
