//! POS order server - single-location restaurant order workflow
//!
//! # Architecture
//!
//! The server owns the order lifecycle from opening to historization:
//!
//! - **orders**: the transactional core (sequence allocation, the
//!   OPEN → PUNCHED → READY → DISPATCHED lifecycle, the kitchen cascade,
//!   discounts, the atomic close, cancellation, the day lock)
//! - **catalog**: read-only master-data boundary (items, sizes, combos)
//! - **auth**: JWT boundary resolving `{business, actor, role}` per request
//! - **api**: HTTP routes and handlers
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT service and extractor
//! ├── catalog/       # master-data boundary
//! ├── orders/        # storage, manager, money, errors
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStorage, OrdersManager};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load environment and initialize logging
pub fn setup_environment() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    init_logger();
    Ok(())
}
