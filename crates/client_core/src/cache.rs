//! Explicit in-memory response cache shared between the client and its owner.
//!
//! Keys follow the `index:<limit>` / `detail:<nameOrId>` scheme. There is no
//! eviction; entries live as long as the cache object.

use std::{collections::HashMap, fmt, sync::Arc};

use shared::domain::{DetailRecord, IndexEntry};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Index(usize),
    Detail(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Index(limit) => write!(f, "index:{limit}"),
            CacheKey::Detail(key) => write!(f, "detail:{key}"),
        }
    }
}

#[derive(Debug, Clone)]
enum CachedResponse {
    Index(Arc<[IndexEntry]>),
    Detail(Arc<DetailRecord>),
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, CachedResponse>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn index(&self, limit: usize) -> Option<Arc<[IndexEntry]>> {
        match self.entries.read().await.get(&CacheKey::Index(limit)) {
            Some(CachedResponse::Index(entries)) => Some(Arc::clone(entries)),
            _ => None,
        }
    }

    pub async fn detail(&self, key: &str) -> Option<Arc<DetailRecord>> {
        match self
            .entries
            .read()
            .await
            .get(&CacheKey::Detail(key.to_string()))
        {
            Some(CachedResponse::Detail(record)) => Some(Arc::clone(record)),
            _ => None,
        }
    }

    pub async fn insert_index(&self, limit: usize, entries: Arc<[IndexEntry]>) {
        self.entries
            .write()
            .await
            .insert(CacheKey::Index(limit), CachedResponse::Index(entries));
    }

    pub async fn insert_detail(&self, key: &str, record: Arc<DetailRecord>) {
        self.entries.write().await.insert(
            CacheKey::Detail(key.to_string()),
            CachedResponse::Detail(record),
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Rendered keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .await
            .keys()
            .map(ToString::to_string)
            .collect();
        keys.sort();
        keys
    }
}
