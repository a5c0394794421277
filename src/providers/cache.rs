use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::{
    models::{normalize_address, Result, WalletMetrics},
    providers::client::MetricsProvider,
};

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// In-memory address -> metrics cache
#[derive(Debug)]
pub struct MetricsCache {
    entries: RwLock<HashMap<String, CacheEntry<WalletMetrics>>>,
    ttl: Duration,
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

impl MetricsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, address: &str) -> Option<WalletMetrics> {
        let cache = self.entries.read().ok()?;
        let entry = cache.get(&normalize_address(address))?;

        if entry.is_expired() {
            return None;
        }

        Some(entry.value.clone())
    }

    pub fn set(&self, address: &str, metrics: WalletMetrics) {
        if let Ok(mut cache) = self.entries.write() {
            cache.insert(normalize_address(address), CacheEntry::new(metrics, self.ttl));
        }
    }

    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.entries.write() {
            cache.retain(|_, entry| !entry.is_expired());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.write() {
            cache.clear();
        }
    }
}

/// Wraps a provider so repeat lookups of an address within the TTL skip the
/// upstream call. Failures are never cached.
///
/// Only pays off in a long-lived process that serves many requests through
/// one provider; a one-shot CLI run looks each address up once.
pub struct CachedMetricsProvider {
    inner: Arc<dyn MetricsProvider>,
    cache: MetricsCache,
}

impl CachedMetricsProvider {
    pub fn new(inner: Arc<dyn MetricsProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: MetricsCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &MetricsCache {
        &self.cache
    }
}

#[async_trait]
impl MetricsProvider for CachedMetricsProvider {
    async fn fetch_metrics(&self, address: &str) -> Result<WalletMetrics> {
        if let Some(metrics) = self.cache.get(address) {
            debug!("Cache hit for {}", address);
            return Ok(metrics);
        }

        let metrics = self.inner.fetch_metrics(address).await?;
        self.cache.cleanup_expired();
        self.cache.set(address, metrics.clone());
        Ok(metrics)
    }
}
