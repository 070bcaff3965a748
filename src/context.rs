/// Application context and dependency injection
use crate::{
    config::{BlobstoreConfig, ServerConfig},
    error::RecordsResult,
    object_store::{DiskObjectStore, HttpObjectStore, HttpStoreConfig, MemoryObjectStore, ObjectStore},
    rate_limit::RateLimiter,
    record_store::RecordStore,
    session::{MemorySessionStore, SessionStore},
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub record_store: Arc<RecordStore>,
    pub session_store: Arc<dyn SessionStore>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> RecordsResult<Self> {
        config.validate()?;

        let backend: Arc<dyn ObjectStore> = match &config.blobstore {
            BlobstoreConfig::Disk {
                location,
                public_base_url,
            } => {
                tokio::fs::create_dir_all(location).await?;
                tracing::info!("Object store: disk at {:?}", location);
                Arc::new(DiskObjectStore::new(
                    location.clone(),
                    public_base_url.clone(),
                ))
            }
            BlobstoreConfig::Http { endpoint, token } => {
                tracing::info!("Object store: blob API at {}", endpoint);
                Arc::new(HttpObjectStore::new(HttpStoreConfig {
                    endpoint: endpoint.clone(),
                    token: token.clone(),
                }))
            }
            BlobstoreConfig::Memory => {
                tracing::info!("Object store: in-memory (ephemeral)");
                Arc::new(MemoryObjectStore::new())
            }
        };

        Ok(Self::with_object_store(config, backend))
    }

    /// Build a context around an already-constructed backend. The injection
    /// seam router tests use to observe puts.
    pub fn with_object_store(config: ServerConfig, backend: Arc<dyn ObjectStore>) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        Self {
            config: Arc::new(config),
            record_store: Arc::new(RecordStore::new(backend)),
            session_store: Arc::new(MemorySessionStore::new()),
            rate_limiter,
        }
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
