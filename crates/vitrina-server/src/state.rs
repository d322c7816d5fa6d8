//! Application state.

use std::sync::Arc;

use vitrina_catalog::{CatalogSource, RestBackend};

use crate::cache::CatalogCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative catalog source.
    catalog: Arc<dyn CatalogSource>,
    /// The cache client in front of it.
    cache: CatalogCache,
}

impl AppState {
    /// Creates a new AppState with the given catalog source and cache.
    pub fn new(catalog: Arc<dyn CatalogSource>, cache: CatalogCache) -> Self {
        Self { catalog, cache }
    }

    /// Creates an AppState from a RestBackend.
    pub fn from_rest_backend(backend: RestBackend, cache: CatalogCache) -> Self {
        Self {
            catalog: Arc::new(backend),
            cache,
        }
    }

    /// Returns a reference to the catalog source.
    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }

    /// Returns a reference to the cache client.
    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }
}
