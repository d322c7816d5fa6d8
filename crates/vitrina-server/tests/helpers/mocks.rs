//! Mocks de catalogo y cache store para tests de integracion.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusBuilder;
use time::macros::datetime;
use uuid::Uuid;

use vitrina_catalog::{
    CatalogError, CatalogSource, Product, ProductStatus, UserIdentity, UserRole,
};
use vitrina_server::cache::{CacheConfig, CacheError, CacheStore, CatalogCache, MemoryStore};
use vitrina_server::middleware::CorsConfig;
use vitrina_server::{AppState, RuntimeEnv, create_router_with_state};

use super::client::TestClient;

/// Catalogo en memoria que cuenta cada llamada al origen.
///
/// Los contadores permiten verificar que un hit de cache NO toca el origen
/// y que el orden de verificacion de auth es el esperado.
#[derive(Default)]
pub struct MockCatalog {
    products: Vec<Product>,
    tokens: HashMap<String, UserIdentity>,
    roles: HashMap<Uuid, UserRole>,
    fail: bool,
    product_calls: AtomicU32,
    listing_calls: AtomicU32,
    verify_calls: AtomicU32,
    role_calls: AtomicU32,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Registra un token que resuelve a un usuario con perfil admin.
    pub fn with_admin_token(mut self, token: &str) -> Self {
        let id = Uuid::now_v7();
        self.tokens.insert(
            token.to_string(),
            UserIdentity {
                id,
                email: Some("admin@vitrina.art".to_string()),
            },
        );
        self.roles.insert(id, UserRole::Admin);
        self
    }

    /// Registra un token que resuelve a un usuario con perfil customer.
    pub fn with_customer_token(mut self, token: &str) -> Self {
        let id = Uuid::now_v7();
        self.tokens.insert(
            token.to_string(),
            UserIdentity {
                id,
                email: Some("cliente@example.com".to_string()),
            },
        );
        self.roles.insert(id, UserRole::Customer);
        self
    }

    /// Token valido cuyo usuario no tiene fila de perfil.
    pub fn with_unprofiled_token(mut self, token: &str) -> Self {
        let id = Uuid::now_v7();
        self.tokens
            .insert(token.to_string(), UserIdentity { id, email: None });
        self
    }

    /// Hace fallar todas las lecturas contra el origen.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn product_calls(&self) -> u32 {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn listing_calls(&self) -> u32 {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> u32 {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn role_calls(&self) -> u32 {
        self.role_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.fail {
            Err(CatalogError::status(503))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn published_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.status.is_publicly_visible())
            .cloned()
            .collect())
    }

    async fn verify_token(&self, token: &str) -> Result<Option<UserIdentity>, CatalogError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.tokens.get(token).cloned())
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, CatalogError> {
        self.role_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.roles.get(&user_id).copied())
    }

    fn name(&self) -> &str {
        "mock-catalog"
    }
}

/// Store cuyo backend esta caido: toda operacion falla.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _payload: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn delete_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }
}

/// Store que sirve lecturas pero rechaza escrituras.
pub struct WriteFailingStore {
    inner: MemoryStore,
}

impl WriteFailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl CacheStore for WriteFailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _payload: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Operation(
            "READONLY You can't write against a read only replica.".to_string(),
        ))
    }

    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError> {
        self.inner.delete(keys).await
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        self.inner.delete_pattern(pattern).await
    }
}

/// Producto de prueba publicado con el slug dado.
pub fn product(slug: &str) -> Product {
    Product {
        id: Uuid::now_v7(),
        title: format!("Obra {slug}"),
        title_en: format!("Artwork {slug}"),
        slug: slug.to_string(),
        description: Some("Oleo sobre lienzo".to_string()),
        description_en: Some("Oil on canvas".to_string()),
        price: 1200.0,
        image_url: format!("https://cdn.vitrina.art/{slug}.webp"),
        status: ProductStatus::Published,
        created_at: datetime!(2024-03-05 10:30 UTC),
        updated_at: datetime!(2024-03-05 10:30 UTC),
    }
}

/// MemoryStore con las claves de producto y de listado ya pobladas.
pub async fn seeded_store(products: &[Product]) -> Arc<MemoryStore> {
    let ttl = Duration::from_secs(300);
    let store = Arc::new(MemoryStore::new());

    for p in products {
        store
            .set(
                &format!("product:{}", p.slug),
                &serde_json::to_string(p).unwrap(),
                ttl,
            )
            .await
            .unwrap();
    }
    store
        .set("products:all", &serde_json::to_string(products).unwrap(), ttl)
        .await
        .unwrap();

    store
}

/// TestClient sobre el router completo, entorno development.
pub fn client_with(catalog: Arc<dyn CatalogSource>, store: Arc<dyn CacheStore>) -> TestClient {
    client_with_env(catalog, store, RuntimeEnv::Development)
}

/// TestClient sobre el router completo con el entorno dado.
pub fn client_with_env(
    catalog: Arc<dyn CatalogSource>,
    store: Arc<dyn CacheStore>,
    env: RuntimeEnv,
) -> TestClient {
    let cache = CatalogCache::new(store, CacheConfig::default());
    // Recorder local: el global solo puede instalarse una vez por proceso
    // y los tests corren en paralelo.
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::new(catalog, cache);

    TestClient::new(create_router_with_state(
        state,
        CorsConfig::for_environment(env),
        handle,
    ))
}
