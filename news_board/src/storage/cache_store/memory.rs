use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, CachedEntry, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }

    fn evict_expired(&mut self, now: Instant) {
        let before = self.entry.len();
        self.entry.retain(|_, cached| !cached.is_expired(now));
        let evicted = before - self.entry.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} expired cache entries", evicted);
        }
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn put(&mut self, prefix: &str, key: &str, value: CacheData) -> Result<(), StorageError> {
        self.entry.insert(
            Self::make_key(prefix, key),
            CachedEntry {
                data: value,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let now = Instant::now();
        self.evict_expired(now);
        self.entry.insert(
            Self::make_key(prefix, key),
            CachedEntry {
                data: value,
                expires_at: now.checked_add(Duration::from_secs(ttl as u64)),
            },
        );
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        Ok(self
            .entry
            .get(&Self::make_key(prefix, key))
            .filter(|cached| !cached.is_expired(Instant::now()))
            .map(|cached| cached.data.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        self.entry.remove(&Self::make_key(prefix, key));
        Ok(())
    }
}
