//! Test helpers para vitrina-server.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod client;
pub mod mocks;

pub use assertions::*;
pub use client::{TestClient, TestResponse};
pub use mocks::{
    FailingStore, MockCatalog, WriteFailingStore, client_with, client_with_env, product,
    seeded_store,
};
