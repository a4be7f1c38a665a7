//! In-memory cache store with per-entry expiry.
//!
//! Entries live in a concurrent map keyed by cache key. Expired entries read
//! as misses and are dropped on the next write.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;
use crate::port::outbound::CacheStore;

/// Thread-safe record-list cache.
pub struct MemoryCache<T> {
    /// Cached lists with their insertion time.
    entries: DashMap<String, (Instant, Vec<T>)>,
    /// Time-to-live; `None` keeps entries until replaced.
    ttl: Option<Duration>,
}

impl<T: Clone> MemoryCache<T> {
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Replace the list under `key` without going through the async port.
    pub fn insert(&self, key: impl Into<String>, records: Vec<T>) {
        self.entries.insert(key.into(), (Instant::now(), records));
        self.gc();
    }

    /// Number of entries, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, inserted: Instant, now: Instant) -> bool {
        self.ttl.map_or(true, |ttl| now.duration_since(inserted) < ttl)
    }

    /// Drop expired entries.
    fn gc(&self) {
        if self.ttl.is_none() {
            return;
        }
        let now = Instant::now();
        self.entries
            .retain(|_, (inserted, _)| self.is_fresh(*inserted, now));
    }
}

#[async_trait]
impl<T> CacheStore<T> for MemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self, key: &str) -> Result<Option<Vec<T>>> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(entry.0, now))
            .map(|entry| entry.1.clone()))
    }

    async fn store(&self, key: &str, records: Vec<T>) -> Result<()> {
        self.insert(key, records);
        Ok(())
    }
}
