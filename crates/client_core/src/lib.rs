use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{DetailRecord, IndexEntry},
    error::NetworkError,
    protocol::IndexResponse,
};
use tracing::{debug, warn};

pub mod cache;

pub use cache::{CacheKey, ResponseCache};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_RESOURCE: &str = "pokemon";

/// Raw, uncached access to the remote catalog service.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn get_index(&self, limit: usize) -> Result<IndexResponse, NetworkError>;
    async fn get_detail(&self, key: &str) -> Result<DetailRecord, NetworkError>;
}

/// What the load orchestrator needs from the remote side.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, NetworkError>;
    async fn fetch_detail(&self, key: &str) -> Result<Arc<DetailRecord>, NetworkError>;
    /// Resolves one batch. Individual item failures are dropped by
    /// implementations; an `Err` means the batch as a whole could not run.
    async fn fetch_batch(
        &self,
        entries: &[IndexEntry],
    ) -> Result<Vec<Arc<DetailRecord>>, NetworkError>;
}

pub struct HttpTransport {
    http: Client,
    base_url: String,
    resource: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into().trim_matches('/').to_string();
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
    ) -> Result<T, NetworkError> {
        let res = request
            .send()
            .await
            .map_err(|e| NetworkError::transport(label, e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(NetworkError::status(
                label,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| NetworkError::transport(label, e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| NetworkError::decode(label, e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_index(&self, limit: usize) -> Result<IndexResponse, NetworkError> {
        let label = CacheKey::Index(limit).to_string();
        let request = self
            .http
            .get(self.collection_url())
            .query(&[("limit", limit)]);
        self.get_json(&label, request).await
    }

    async fn get_detail(&self, key: &str) -> Result<DetailRecord, NetworkError> {
        let label = CacheKey::Detail(key.to_string()).to_string();
        let request = self.http.get(format!("{}/{key}", self.collection_url()));
        self.get_json(&label, request).await
    }
}

/// Cached client over a [`CatalogTransport`].
pub struct CatalogClient<T: CatalogTransport> {
    transport: T,
    cache: Arc<ResponseCache>,
}

impl<T: CatalogTransport> CatalogClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_cache(transport, Arc::new(ResponseCache::new()))
    }

    pub fn with_cache(transport: T, cache: Arc<ResponseCache>) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, NetworkError> {
        if let Some(entries) = self.cache.index(limit).await {
            debug!(limit, "catalog: index served from cache");
            return Ok(entries.to_vec());
        }

        let response = self.transport.get_index(limit).await.inspect_err(|err| {
            warn!(limit, error = %err, "catalog: index fetch failed");
        })?;
        let entries: Arc<[IndexEntry]> = response.results.into();
        self.cache.insert_index(limit, Arc::clone(&entries)).await;
        Ok(entries.to_vec())
    }

    pub async fn fetch_detail(&self, key: &str) -> Result<Arc<DetailRecord>, NetworkError> {
        if let Some(record) = self.cache.detail(key).await {
            return Ok(record);
        }

        let record = Arc::new(self.transport.get_detail(key).await?);
        self.cache.insert_detail(key, Arc::clone(&record)).await;
        Ok(record)
    }

    /// Fetches every entry concurrently and keeps the successes in input order.
    pub async fn fetch_batch(&self, entries: &[IndexEntry]) -> Vec<Arc<DetailRecord>> {
        let results = join_all(
            entries
                .iter()
                .map(|entry| async move { (entry, self.fetch_detail(&entry.name).await) }),
        )
        .await;

        results
            .into_iter()
            .filter_map(|(entry, result)| match result {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(
                        key = %entry.name,
                        error = %err,
                        "catalog: detail fetch failed; dropping from batch"
                    );
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl<T: CatalogTransport> CatalogSource for CatalogClient<T> {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, NetworkError> {
        CatalogClient::fetch_index(self, limit).await
    }

    async fn fetch_detail(&self, key: &str) -> Result<Arc<DetailRecord>, NetworkError> {
        CatalogClient::fetch_detail(self, key).await
    }

    async fn fetch_batch(
        &self,
        entries: &[IndexEntry],
    ) -> Result<Vec<Arc<DetailRecord>>, NetworkError> {
        Ok(CatalogClient::fetch_batch(self, entries).await)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
