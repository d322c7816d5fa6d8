//! HTTP endpoint handlers.

pub mod health;
pub mod invalidate;
pub mod metrics;
pub mod products;
pub mod response;
