//! Cache Store Module
//!
//! Main cache engine: a key-value map with per-entry TTL expiration,
//! evaluated lazily on read and proactively by a periodic sweep.
//!
//! Cached state is a performance optimization only. Every value held here is
//! re-derivable by calling the backend again; nothing treats the cache as a
//! source of truth.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// In-memory key-value store with per-entry expiration and statistics.
///
/// There is no maximum-size bound or LRU policy; entries leave only by
/// deletion, expiry-on-read, or the periodic sweep.
#[derive(Debug, Default)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any existing entry for the key and resets its TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns a clone of the value if present and not expired. An expired
    /// entry is removed on the spot and counted as a miss (lazy expiration).
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_eviction();
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key. Idempotent; a no-op if the key is absent.
    ///
    /// Returns true if an entry was actually removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Delete Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Used to invalidate parameterized key families (paginated views) in
    /// one pass. Returns the number of entries removed.
    pub fn delete_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes all entries.
    ///
    /// Used on sign-out so no cached data from the previous user survives
    /// in memory.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes all entries whose TTL has elapsed.
    ///
    /// Entries that are still valid are never removed. Returns the number
    /// of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.stats.record_eviction();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == App Cache ==
/// The process-wide cache instance stores heterogeneous domain values as
/// JSON, behind typed helpers.
pub type AppCache = TtlCache<Value>;

impl AppCache {
    /// Retrieves and deserializes a value by key.
    ///
    /// A value that fails to deserialize into `T` is treated as a miss;
    /// the stale entry is dropped so the next read refetches.
    pub fn get_json<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "cached value failed to deserialize, dropping");
                self.delete(key);
                None
            }
        }
    }

    /// Serializes and stores a value under `key`.
    pub fn set_json<T: Serialize>(&mut self, key: impl Into<String>, value: &T, ttl: Duration) {
        match serde_json::to_value(value) {
            Ok(raw) => self.set(key, raw, ttl),
            Err(err) => warn!(%err, "value failed to serialize, not cached"),
        }
    }
}
