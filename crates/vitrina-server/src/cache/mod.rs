//! Cache module for the Vitrina catalog server.
//!
//! This module provides the read-through cache layer over a remote
//! key-value store, with TTL-based expiration, scope-based invalidation,
//! and metrics. Reads and fills degrade to origin traffic when the store
//! is unavailable; only invalidation surfaces store failures.

pub mod catalog_cache;
pub mod invalidation;
pub mod keys;
pub mod memory;
pub mod redis_store;
pub mod store;

// Re-exports
pub use catalog_cache::{CacheConfig, CatalogCache};
pub use invalidation::{InvalidationOutcome, InvalidationScope};
pub use keys::CacheKey;
pub use memory::MemoryStore;
pub use redis_store::{RedisConfig, RedisStore};
pub use store::{CacheError, CacheStore};
