//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Business-day and configuration errors
/// - 4xxx: Order lifecycle errors
/// - 5xxx: Payment and discount errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Business-day and configuration errors (3xxx)
    BusinessDay,
    /// Order lifecycle errors (4xxx)
    Order,
    /// Payment and discount errors (5xxx)
    Payment,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::BusinessDay,
            4000..5000 => Self::Order,
            5000..6000 => Self::Payment,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::BusinessDay => "business_day",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Whether the caller may retry the operation without changing anything
    ///
    /// Precondition, validation, and configuration failures will fail again
    /// until state or input changes. Lifecycle conflicts are safe to retry
    /// after re-reading state; transient system failures are safe to retry
    /// with backoff. `SequenceNotConfigured` requires operator intervention
    /// and is never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorCode::SequenceNotConfigured => false,
            ErrorCode::OrderNotEligible
            | ErrorCode::OrderNotReady
            | ErrorCode::OrderNotReadyToClose
            | ErrorCode::ItemNotFoundOrAlreadyProcessed => true,
            ErrorCode::DatabaseError | ErrorCode::SystemBusy | ErrorCode::InternalError => true,
            _ => false,
        }
    }
}
