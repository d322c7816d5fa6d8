//! Cache invalidation scopes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use super::catalog_cache::CatalogCache;
use super::keys::{COLLECTION_KEY, PRODUCT_PATTERN};
use super::store::CacheError;

/// What an administrative purge covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationScope {
    /// Every single-product entry (`product:*`).
    Products,
    /// The full-listing entry (`products:all`).
    Collections,
    /// Both of the above.
    All,
}

/// Discriminador de invalidacion no reconocido.
#[derive(Debug, Error)]
#[error("unknown invalidation type: {0}")]
pub struct UnknownScope(pub String);

impl InvalidationScope {
    /// Forma textual usada en requests y responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Collections => "collections",
            Self::All => "all",
        }
    }
}

impl fmt::Display for InvalidationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvalidationScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "collections" => Ok(Self::Collections),
            "all" => Ok(Self::All),
            other => Err(UnknownScope(other.to_string())),
        }
    }
}

/// Resultado de una pasada de invalidacion.
#[derive(Debug, Clone)]
pub struct InvalidationOutcome {
    /// Scope aplicado.
    pub scope: InvalidationScope,
    /// Entradas realmente removidas.
    pub removed: u64,
}

impl CatalogCache {
    /// Applies an invalidation scope against the store.
    ///
    /// Purging a scope with no live entries succeeds with `removed == 0`,
    /// so repeated purges are idempotent. Store failures propagate: this is
    /// the one cache path that must not degrade silently.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use vitrina_server::cache::{CacheConfig, CatalogCache, InvalidationScope, MemoryStore};
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let cache = CatalogCache::new(Arc::new(MemoryStore::new()), CacheConfig::default());
    /// let outcome = cache.invalidate(InvalidationScope::All).await.unwrap();
    /// println!("Removed {} entries", outcome.removed);
    /// # }
    /// ```
    pub async fn invalidate(
        &self,
        scope: InvalidationScope,
    ) -> Result<InvalidationOutcome, CacheError> {
        let removed = match scope {
            InvalidationScope::Products => self.delete_pattern(PRODUCT_PATTERN).await?,
            InvalidationScope::Collections => self.delete(&[COLLECTION_KEY.to_string()]).await?,
            InvalidationScope::All => {
                let singles = self.delete_pattern(PRODUCT_PATTERN).await?;
                let listing = self.delete(&[COLLECTION_KEY.to_string()]).await?;
                singles + listing
            }
        };

        self.metrics().record_invalidation(scope.as_str(), removed);

        info!(
            scope = %scope,
            removed = removed,
            "Cache entries invalidated"
        );

        Ok(InvalidationOutcome { scope, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CacheKey, CacheStore, MemoryStore};
    use std::sync::Arc;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    async fn seeded() -> (Arc<MemoryStore>, CatalogCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = CatalogCache::new(store.clone(), CacheConfig::default());

        for slug in ["marina-azul", "atardecer", "bodegon"] {
            store
                .set(&CacheKey::product(slug).to_string(), "{}", TTL)
                .await
                .unwrap();
        }
        store
            .set(&CacheKey::Collection.to_string(), "[]", TTL)
            .await
            .unwrap();

        (store, cache)
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!(
            "products".parse::<InvalidationScope>().unwrap(),
            InvalidationScope::Products
        );
        assert_eq!(
            "collections".parse::<InvalidationScope>().unwrap(),
            InvalidationScope::Collections
        );
        assert_eq!(
            "all".parse::<InvalidationScope>().unwrap(),
            InvalidationScope::All
        );

        let err = "everything".parse::<InvalidationScope>().unwrap_err();
        assert_eq!(err.to_string(), "unknown invalidation type: everything");

        // Sin normalizacion: el discriminador es exacto.
        assert!("Products".parse::<InvalidationScope>().is_err());
    }

    #[test]
    fn test_scope_display_round_trip() {
        for scope in [
            InvalidationScope::Products,
            InvalidationScope::Collections,
            InvalidationScope::All,
        ] {
            assert_eq!(scope.to_string().parse::<InvalidationScope>().unwrap(), scope);
        }
    }

    #[tokio::test]
    async fn test_invalidate_products_keeps_listing() {
        let (store, cache) = seeded().await;

        let outcome = cache.invalidate(InvalidationScope::Products).await.unwrap();

        assert_eq!(outcome.removed, 3);
        assert!(store.get("product:marina-azul").await.unwrap().is_none());
        assert!(store.get("products:all").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_collections_keeps_products() {
        let (store, cache) = seeded().await;

        let outcome = cache
            .invalidate(InvalidationScope::Collections)
            .await
            .unwrap();

        assert_eq!(outcome.removed, 1);
        assert!(store.get("products:all").await.unwrap().is_none());
        assert!(store.get("product:marina-azul").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_everything() {
        let (store, cache) = seeded().await;

        let outcome = cache.invalidate(InvalidationScope::All).await.unwrap();

        assert_eq!(outcome.removed, 4);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalidation_is_idempotent() {
        let (_store, cache) = seeded().await;

        let first = cache.invalidate(InvalidationScope::All).await.unwrap();
        assert_eq!(first.removed, 4);

        // Segunda pasada sobre un cache vacio: exito con cero removidas.
        let second = cache.invalidate(InvalidationScope::All).await.unwrap();
        assert_eq!(second.removed, 0);
    }
}
