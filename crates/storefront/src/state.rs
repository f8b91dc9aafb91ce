//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::MenuCatalog;
use crate::config::StorefrontConfig;
use crate::db::{FileStore, KeyValueStore, MemoryStore, StoreError};
use crate::models::DraftLimits;
use crate::services::{AuthService, CheckoutService, OrderService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: MenuCatalog,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Create a new application state over an explicit store.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: MenuCatalog,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
            }),
        }
    }

    /// Create the state the binary runs with: the seeded catalog and the
    /// store selected by `DAEBAK_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be created.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "Using file store");
                Arc::new(FileStore::open(dir)?)
            }
            None => {
                tracing::warn!("DAEBAK_DATA_DIR not set, orders are kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(config, MenuCatalog::seeded(), store))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &MenuCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Draft bounds from configuration.
    #[must_use]
    pub fn limits(&self) -> &DraftLimits {
        &self.inner.config.limits
    }

    /// Authentication service over the shared store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.store())
    }

    /// Checkout service over the catalog and the shared store.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(self.catalog(), self.store())
    }

    /// Order service over the shared store.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self.store(), self.limits())
    }
}
