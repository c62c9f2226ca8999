//! Unified error handling
//!
//! - [`ErrorCode`]: stable u16 codes shared with clients
//! - [`ErrorCategory`]: range-based classification and retry policy
//! - [`AppError`] / [`ApiResponse`]: error type and response envelope

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
