//! Catalog source trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;
use crate::product::Product;

/// An authenticated identity as reported by the origin's auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Role recorded on a user profile in the origin store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Customer,
}

impl UserRole {
    /// True for identities allowed to manage the cache.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A source of authoritative catalog data.
///
/// This trait abstracts over the hosted origin so the server can read
/// products and resolve identities without knowing the transport. The cache
/// layer holds time-bounded copies of what this trait returns; whenever the
/// two disagree, the source wins.
///
/// # Implementors
///
/// - `RestBackend` - Reads from the hosted origin's REST interface
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches a single product by its slug.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no product carries the slug. Absence is a well-formed
    /// outcome, not an error.
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError>;

    /// Fetches every publicly visible product (published or sold),
    /// newest first.
    async fn published_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Resolves a bearer token to an identity.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the origin rejects the token as invalid or expired.
    /// Transport failures are errors, not `None`.
    async fn verify_token(&self, token: &str) -> Result<Option<UserIdentity>, CatalogError>;

    /// Looks up the role recorded for a user profile.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the user has no profile row.
    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, CatalogError>;

    /// Performs a health check on the catalog source.
    ///
    /// The default implementation reports healthy; backends with a real
    /// transport should override it.
    async fn health_check(&self) -> Result<(), CatalogError> {
        Ok(())
    }

    /// Returns the name of this catalog source.
    ///
    /// This is used for logging and identification purposes.
    fn name(&self) -> &str;
}
