//! REST backend for the hosted catalog origin.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::product::{Product, ProductStatus};
use crate::source::{CatalogSource, UserIdentity, UserRole};

/// Configuration for [`RestBackend`].
#[derive(Debug, Clone)]
pub struct RestBackendConfig {
    base_url: Url,
    service_key: String,
    timeout: Duration,
}

impl RestBackendConfig {
    /// Default budget for a single origin round trip.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration from the origin URL and the service
    /// credential used for server-side reads.
    pub fn new(
        base_url: impl AsRef<str>,
        service_key: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| CatalogError::config(format!("invalid origin URL: {e}")))?;
        let service_key = service_key.into();
        if service_key.trim().is_empty() {
            return Err(CatalogError::config("origin service key cannot be empty"));
        }
        Ok(Self {
            base_url,
            service_key,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Row shape for the profile role lookup.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    role: UserRole,
}

/// Catalog source backed by the hosted origin's REST interface.
///
/// Product rows are read through the relational store's REST facade and
/// identities are resolved through the auth endpoint. Every request carries
/// the service credential in the `apikey` header; the `Authorization` slot
/// also carries it, except for token verification where the caller's token
/// takes its place.
pub struct RestBackend {
    http: Client,
    config: RestBackendConfig,
}

impl RestBackend {
    /// Creates a backend for the given origin.
    pub fn new(config: RestBackendConfig) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| CatalogError::config(format!("invalid endpoint path {path}: {e}")))
    }

    /// Runs a GET with the service credential and decodes the JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(url)
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogSource for RestBackend {
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let mut url = self.endpoint("/rest/v1/products")?;
        url.query_pairs_mut()
            .append_pair("slug", &format!("eq.{slug}"))
            .append_pair("limit", "1");

        debug!(slug = %slug, "Fetching product from origin");
        let rows: Vec<Product> = self.fetch_json(url).await?;
        Ok(rows.into_iter().next())
    }

    async fn published_products(&self) -> Result<Vec<Product>, CatalogError> {
        let statuses = ProductStatus::PUBLICLY_VISIBLE
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint("/rest/v1/products")?;
        url.query_pairs_mut()
            .append_pair("status", &format!("in.({statuses})"))
            .append_pair("order", "created_at.desc");

        debug!("Fetching published products from origin");
        self.fetch_json(url).await
    }

    async fn verify_token(&self, token: &str) -> Result<Option<UserIdentity>, CatalogError> {
        let url = self.endpoint("/auth/v1/user")?;
        let response = self
            .http
            .get(url)
            .header("apikey", &self.config.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                let identity: UserIdentity = serde_json::from_slice(&bytes)?;
                Ok(Some(identity))
            }
            // El origen responde 401/403 para tokens invalidos o expirados.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(CatalogError::status(status.as_u16())),
        }
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, CatalogError> {
        let mut url = self.endpoint("/rest/v1/profiles")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{user_id}"))
            .append_pair("select", "role")
            .append_pair("limit", "1");

        let rows: Vec<ProfileRow> = self.fetch_json(url).await?;
        Ok(rows.into_iter().next().map(|row| row.role))
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        let mut url = self.endpoint("/rest/v1/products")?;
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");

        let _: Vec<serde_json::Value> = self.fetch_json(url).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "origin-rest"
    }
}
