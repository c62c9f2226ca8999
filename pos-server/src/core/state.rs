//! Shared server state

use std::sync::Arc;

use crate::auth::JwtService;
use crate::catalog::InMemoryCatalog;
use crate::core::Config;
use crate::orders::{OrderStorage, OrdersManager};

/// Server state, holding shared references to every service
///
/// `Clone` is shallow (`Arc`s and handles), so the state can be cloned per
/// request without cost. The storage handle is the process-wide store
/// described in the data-flow design: opened once at startup, dropped (and
/// therefore flushed) on shutdown; no other global mutable state exists.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded order database
    pub storage: OrderStorage,
    /// Master-data cache (menu items, sizes, combos)
    pub catalog: Arc<InMemoryCatalog>,
    /// The order workflow engine
    pub orders: OrdersManager,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Ensures the work directory structure, opens the database at
    /// `work_dir/database/pos.db`, and wires the services together.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or the database cannot be initialized;
    /// the server is useless without either.
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("pos.db");
        let storage = OrderStorage::open(&db_path).expect("Failed to initialize database");
        tracing::info!(path = %db_path.display(), "Order database ready");

        let catalog = Arc::new(InMemoryCatalog::new());
        let orders = OrdersManager::new(storage.clone(), catalog.clone());
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        Self {
            config: config.clone(),
            storage,
            catalog,
            orders,
            jwt_service,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
