//! Client Builder
//!
//! Assembles an HTTP client, optionally wrapped in the caching decorator.

use std::sync::Arc;

use tracing::info;

use crate::cache::CacheStore;
use crate::caching::{CacheTtlConfig, CachingClient, SharedStore};
use crate::client::CfToolsClient;
use crate::error::Result;
use crate::http::{HttpClient, LoginCredentials, DEFAULT_BASE_URL};
use crate::models::ServerApiId;

/// What `CfToolsClientBuilder::build` hands back.
pub struct BuiltClient {
    pub client: Arc<dyn CfToolsClient>,
    /// Present when caching was enabled; feed it to `spawn_cleanup_task`.
    pub cache_store: Option<SharedStore>,
}

#[derive(Debug, Default)]
pub struct CfToolsClientBuilder {
    server_api_id: Option<ServerApiId>,
    credentials: Option<LoginCredentials>,
    base_url: Option<String>,
    cache: Option<CacheTtlConfig>,
}

impl CfToolsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default server for server-scoped operations.
    pub fn with_server_api_id(mut self, server_api_id: impl Into<String>) -> Self {
        self.server_api_id = Some(ServerApiId::new(server_api_id));
        self
    }

    pub fn with_credentials(mut self, application_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials = Some(LoginCredentials::new(application_id, secret));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Wraps the client in a `CachingClient` with these TTLs.
    pub fn with_cache(mut self, ttls: CacheTtlConfig) -> Self {
        self.cache = Some(ttls);
        self
    }

    pub fn build(self) -> Result<BuiltClient> {
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let http = HttpClient::new(base_url, self.server_api_id.clone(), self.credentials)?;

        let Some(ttls) = self.cache else {
            return Ok(BuiltClient {
                client: Arc::new(http),
                cache_store: None,
            });
        };

        info!(?ttls, "Response caching enabled");
        let caching = CachingClient::new(CacheStore::new(), ttls, http, self.server_api_id);
        let store = caching.store();

        Ok(BuiltClient {
            client: Arc::new(caching),
            cache_store: Some(store),
        })
    }
}
