//! Application state for the rule engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration and the time card store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<InMemoryStore>,
}

impl AppState {
    /// Creates a state whose store is seeded with the configured contracts.
    pub fn new(config: ConfigLoader) -> Self {
        let store = InMemoryStore::from_config(&config);
        Self::with_store(config, store)
    }

    /// Creates a state around an existing store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the time card store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}
