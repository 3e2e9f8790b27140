//! Shared catalog handle
//!
//! A [`SharedCatalog`] is the one long-lived catalog that every facade in a
//! process (one per user) works against. It bundles:
//! - the [`CatalogStore`] behind a reader/writer lock
//! - the [`AuthorRegistry`]
//! - the [`CatalogConfig`] it was built with
//!
//! Handles are cheap to clone and all clones see the same state. The
//! process-wide instance from [`SharedCatalog::global`] is created on first
//! access and never torn down; tests and embedders build their own with
//! [`SharedCatalog::new`].

use crate::author::AuthorRegistry;
use crate::config::CatalogConfig;
use crate::store::CatalogStore;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static GLOBAL: Lazy<SharedCatalog> = Lazy::new(|| {
    tracing::debug!("Initializing process-wide catalog");
    SharedCatalog::new(CatalogConfig::default())
});

#[derive(Debug)]
struct Inner {
    store: RwLock<CatalogStore>,
    authors: AuthorRegistry,
    config: CatalogConfig,
}

/// Handle to one lock-guarded catalog
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<Inner>,
}

impl SharedCatalog {
    /// Create an independent catalog
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: RwLock::new(CatalogStore::new(config.root_name.clone())),
                authors: AuthorRegistry::new(),
                config,
            }),
        }
    }

    /// Process-wide catalog, created on first access
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Run `f` under the shared read lock
    pub fn read<R>(&self, f: impl FnOnce(&CatalogStore) -> R) -> R {
        f(&*self.inner.store.read())
    }

    /// Run `f` under the exclusive write lock
    ///
    /// The lock is held for the whole closure, so lookups and mutations done
    /// inside it are atomic with respect to other handles.
    pub fn write<R>(&self, f: impl FnOnce(&mut CatalogStore) -> R) -> R {
        f(&mut *self.inner.store.write())
    }

    /// Point-in-time copy of the store
    #[must_use]
    pub fn snapshot(&self) -> CatalogStore {
        self.inner.store.read().clone()
    }

    /// Author registry
    #[inline]
    #[must_use]
    pub fn authors(&self) -> &AuthorRegistry {
        &self.inner.authors
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Check if two handles share one catalog
    #[inline]
    #[must_use]
    pub fn same_catalog(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
