/// In-memory response cache with time-based expiry
///
/// Values are stored as `serde_json::Value` so one store can hold every
/// normalized record type. Expiry is lazy: a stale entry stays counted by
/// `len()` until a lookup finds and removes it, or the cache is cleared.
use super::config::CacheConfig;
use super::keys::CacheKey;
use crate::logger::{self, LogTag};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Cache entry with write-time tracking
struct CacheEntry {
    value: serde_json::Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(value: serde_json::Value) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Lookup outcomes since the cache was created
///
/// A stale entry found by a lookup counts as both a miss and an expiration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
}

struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    metrics: CacheMetrics,
}

pub struct ResponseCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                metrics: CacheMetrics::default(),
            }),
        }
    }

    /// Fresh value for `key`, removing the entry first if it has gone stale
    pub fn get<T>(&self, key: &CacheKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let ttl = self.config.ttl;
        let mut state = self.state.lock();

        let lookup = state.entries.get(key).map(|entry| {
            if entry.is_expired(ttl) {
                None
            } else {
                Some(serde_json::from_value::<T>(entry.value.clone()))
            }
        });

        match lookup {
            None => {
                state.metrics.misses += 1;
                None
            }
            Some(None) => {
                state.entries.remove(key);
                state.metrics.misses += 1;
                state.metrics.expirations += 1;
                logger::debug(LogTag::Cache, &format!("Evicted stale entry {}", key));
                None
            }
            Some(Some(Ok(value))) => {
                state.metrics.hits += 1;
                Some(value)
            }
            Some(Some(Err(e))) => {
                // Stored under a key of a different shape; drop it and refetch
                state.entries.remove(key);
                state.metrics.misses += 1;
                logger::warning(
                    LogTag::Cache,
                    &format!("Dropped undecodable entry {}: {}", key, e),
                );
                None
            }
        }
    }

    /// Store `value`, replacing any previous entry for `key`
    pub fn insert<T>(&self, key: CacheKey, value: &T) -> Result<(), String>
    where
        T: Serialize,
    {
        let json = serde_json::to_value(value)
            .map_err(|e| format!("Failed to serialize cache value for {}: {}", key, e))?;

        let mut state = self.state.lock();
        state.entries.insert(key, CacheEntry::new(json));
        Ok(())
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.state.lock().metrics.clone()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_basic_operations() {
        let cache = ResponseCache::new(CacheConfig::new(Duration::from_secs(60)));

        cache
            .insert(CacheKey::coin("bitcoin"), &"value1".to_string())
            .unwrap();
        assert_eq!(
            cache.get::<String>(&CacheKey::coin("bitcoin")),
            Some("value1".to_string())
        );
        assert_eq!(cache.get::<String>(&CacheKey::coin("nonexistent")), None);

        let metrics = cache.metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert_eq!(metrics.expirations, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiration_is_lazy() {
        let cache = ResponseCache::default();
        cache.insert(CacheKey::global(), &42u32).unwrap();

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get::<u32>(&CacheKey::global()), Some(42));

        tokio::time::advance(Duration::from_secs(1)).await;
        // Stale but not yet looked up: still counted
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get::<u32>(&CacheKey::global()), None);
        assert_eq!(cache.len(), 0);
        let metrics = cache.metrics();
        assert_eq!(metrics.expirations, 1);
        assert_eq!((metrics.hits, metrics.misses), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_age() {
        let cache = ResponseCache::new(CacheConfig::new(Duration::from_secs(10)));
        cache.insert(CacheKey::trending(), &1u32).unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.insert(CacheKey::trending(), &2u32).unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get::<u32>(&CacheKey::trending()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_removes_everything() {
        let cache = ResponseCache::default();
        cache.insert(CacheKey::trending(), &1u32).unwrap();
        cache.insert(CacheKey::global(), &2u32).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get::<u32>(&CacheKey::trending()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shape_mismatch_is_a_miss() {
        let cache = ResponseCache::default();
        cache
            .insert(CacheKey::coin("x"), &"not a number".to_string())
            .unwrap();
        assert_eq!(cache.get::<u32>(&CacheKey::coin("x")), None);
        assert!(cache.is_empty());
    }
}
