//! # Vitrina Catalog
//!
//! Origin backend for the Vitrina catalog cache.
//!
//! This crate provides the data model for catalog products and a REST
//! backend that reads them from the hosted origin store, along with the
//! identity lookups the cache invalidation endpoint needs.
//!
//! ## Features
//!
//! - Async trait-based catalog source abstraction
//! - REST access to the origin's product rows and auth endpoint
//! - Typed product records matching the cached wire format
//!
//! ## Example
//!
//! ```ignore
//! use vitrina_catalog::{CatalogSource, RestBackend, RestBackendConfig};
//!
//! let config = RestBackendConfig::new(
//!     "https://origin.example.com",
//!     service_key,
//! )?;
//! let backend = RestBackend::new(config)?;
//!
//! let product = backend.product_by_slug("marina-azul").await?;
//! ```

pub mod error;
pub mod product;
pub mod rest;
pub mod source;

// Re-exports
pub use error::CatalogError;
pub use product::{Product, ProductStatus};
pub use rest::{RestBackend, RestBackendConfig};
pub use source::{CatalogSource, UserIdentity, UserRole};
