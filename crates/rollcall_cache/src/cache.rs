//! TTL cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cache entry with value and expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for a TTL cache.
#[derive(
    Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct TtlCacheConfig {
    /// Default TTL for cached entries (seconds)
    #[serde(default = "default_ttl")]
    default_ttl: u64,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_size")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_size() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for TtlCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

/// Generic TTL cache with LRU eviction.
///
/// Entries expire after their TTL and are removed lazily on access. When
/// the cache is full, the least recently used entry is evicted. A disabled
/// cache accepts every call and caches nothing, which turns callers into
/// always-recompute without a branch on their side.
///
/// # Example
///
/// ```
/// use rollcall_cache::{TtlCache, TtlCacheConfig};
/// use std::time::Duration;
///
/// let mut cache: TtlCache<(u64, u64), Vec<String>> =
///     TtlCache::new(TtlCacheConfig::default());
///
/// cache.insert((1, 2), vec!["⭐".to_string()], Some(Duration::from_secs(60)));
///
/// if let Some(entry) = cache.get(&(1, 2)) {
///     println!("Cached: {:?}", entry.value());
/// }
/// ```
pub struct TtlCache<K, V> {
    config: TtlCacheConfig,
    entries: HashMap<K, CacheEntry<V>>,
    access_order: Vec<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new cache with configuration.
    pub fn new(config: TtlCacheConfig) -> Self {
        tracing::debug!(
            default_ttl = config.default_ttl,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new TtlCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
        }
    }

    /// Insert a value into the cache.
    ///
    /// Uses the configured default TTL when `ttl` is None.
    pub fn insert(&mut self, key: K, value: V, ttl: Option<Duration>) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        let ttl = ttl.unwrap_or(Duration::from_secs(self.config.default_ttl));
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        };

        // Evict if at capacity
        if self.entries.len() >= self.config.max_size && !self.entries.contains_key(&key) {
            self.evict_lru();
        }

        // Track access order for LRU
        if let Some(pos) = self.access_order.iter().position(|k| k == &key) {
            self.access_order.remove(pos);
        }
        self.access_order.push(key.clone());

        self.entries.insert(key, entry);
    }

    /// Get a cached value.
    ///
    /// Returns None if:
    /// - Entry doesn't exist
    /// - Entry is expired
    /// - Cache is disabled
    pub fn get(&mut self, key: &K) -> Option<&CacheEntry<V>> {
        if !self.config.enabled {
            return None;
        }

        // Check if entry exists and is not expired
        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            self.entries.remove(key);
            if let Some(pos) = self.access_order.iter().position(|k| k == key) {
                self.access_order.remove(pos);
            }
            return None;
        }

        // Update access order for LRU
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            let key_clone = self.access_order.remove(pos);
            self.access_order.push(key_clone);
        }

        let entry = self.entries.get(key);
        if let Some(entry) = entry {
            tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        }
        entry
    }

    /// Get a cached value, computing and caching it on miss or expiry.
    pub fn get_or_compute<F>(&mut self, key: K, ttl: Option<Duration>, compute: F) -> V
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        if let Some(entry) = self.get(&key) {
            return entry.value().clone();
        }
        let value = compute();
        self.insert(key, value.clone(), ttl);
        value
    }

    /// Remove a key before its TTL runs out.
    ///
    /// Returns true when an entry was actually dropped.
    pub fn invalidate(&mut self, key: &K) -> bool {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.entries.remove(key).is_some()
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            let keep = !entry.is_expired();
            if !keep
                && let Some(pos) = self.access_order.iter().position(|k| k == key)
            {
                self.access_order.remove(pos);
            }
            keep
        });

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.first().cloned() {
            tracing::debug!("Evicting LRU entry");
            self.entries.remove(&key);
            self.access_order.remove(0);
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(TtlCacheConfig::default())
    }
}
