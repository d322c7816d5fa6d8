//! Cache key scheme for catalog payloads.

use std::fmt;

/// Prefijo para entradas de producto individual.
pub const PRODUCT_PREFIX: &str = "product:";

/// Glob pattern que cubre todas las entradas de producto individual.
pub const PRODUCT_PATTERN: &str = "product:*";

/// Key bajo la que vive el listado completo.
pub const COLLECTION_KEY: &str = "products:all";

/// A key in the remote cache.
///
/// The rendered forms (`product:<slug>` and `products:all`) are shared with
/// every payload already sitting in the store, so they are a wire contract:
/// changing them strands live entries until their TTL runs out.
///
/// # Examples
///
/// ```
/// use vitrina_server::cache::CacheKey;
///
/// let key = CacheKey::product("marina-azul");
/// assert_eq!(key.to_string(), "product:marina-azul");
/// assert_eq!(CacheKey::Collection.to_string(), "products:all");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A single product, addressed by slug.
    Product(String),
    /// The full publicly visible listing.
    Collection,
}

impl CacheKey {
    /// Crea la key para un producto individual.
    pub fn product(slug: impl Into<String>) -> Self {
        Self::Product(slug.into())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(slug) => write!(f, "{PRODUCT_PREFIX}{slug}"),
            Self::Collection => f.write_str(COLLECTION_KEY),
        }
    }
}
