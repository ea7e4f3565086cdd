//! Shared TTL cache for query responses
//!
//! The settlement UI re-reads the same chain data (balances, allowances,
//! token metadata) constantly. Fetched values are kept here and served until
//! their time-to-live expires, so repeated reads within the window never hit
//! the network. Entries are stored as raw bytes with typed JSON helpers on
//! top.

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, Instant};

use crate::Result;

/// Default time-to-live for cached entries
pub const DEFAULT_QUERY_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
struct CachedEntry {
    data: Vec<u8>,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn is_valid(&self) -> bool {
        self.cached_at.elapsed() < self.ttl
    }
}

/// Concurrent TTL cache shared across query consumers
///
/// Reads and writes go through [`DashMap`], so the cache can be used from
/// multiple tasks without external locking. Expired entries are skipped on
/// read and reclaimed by [`QueryCache::purge_expired`].
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<String, CachedEntry>,
    default_ttl: Duration,
}

impl QueryCache {
    /// Creates a cache with the default TTL
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_QUERY_TTL)
    }

    /// Creates a cache with a custom default TTL
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: ttl,
        }
    }

    /// Returns the default TTL applied by [`QueryCache::insert`]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Gets a cached value if present and not expired
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).and_then(|entry| {
            if entry.is_valid() {
                Some(entry.data.clone())
            } else {
                None
            }
        })
    }

    /// Inserts a value with the default TTL
    pub fn insert(&self, key: impl Into<String>, data: Vec<u8>) {
        self.insert_with_ttl(key, data, self.default_ttl);
    }

    /// Inserts a value with an explicit TTL
    pub fn insert_with_ttl(&self, key: impl Into<String>, data: Vec<u8>, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CachedEntry {
                data,
                cached_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Gets a cached value deserialized from JSON
    ///
    /// Entries that fail to deserialize are treated as misses.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    /// Serializes a value to JSON and inserts it with the default TTL
    pub fn insert_json<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value)?;
        self.insert(key, data);
        Ok(())
    }

    /// Removes a single entry, returning whether it was present
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes all expired entries
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| entry.is_valid());
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
