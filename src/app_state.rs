//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{catalog::Catalog, config::AppConfig, notify::Notifier, store::LedgerStore};

/// The state of the server.
///
/// The store is selected once at startup and shared by reference for the
/// process lifetime; the catalog is immutable after load.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Display name shown in the page title.
    pub owner: String,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Shanghai".
    pub local_timezone: String,

    /// The ledger storage backend.
    pub store: Arc<LedgerStore>,

    /// The task and reward catalog.
    pub catalog: Arc<Catalog>,

    /// The best-effort push notifier.
    pub notifier: Notifier,
}

impl AppState {
    /// Create a new [AppState] from the selected store and loaded config.
    pub fn new(store: LedgerStore, config: AppConfig) -> Self {
        Self {
            owner: config.owner,
            local_timezone: config.timezone,
            store: Arc::new(store),
            catalog: Arc::new(config.catalog),
            notifier: Notifier::new(config.push),
        }
    }
}
