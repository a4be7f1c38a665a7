//! Read-through cache in front of the aggregation paths.
//!
//! The gate never computes anything itself. It answers from the store when
//! the store holds the list, narrowed to the requested addresses, and stores
//! freshly computed unfiltered lists for later calls.

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::domain::{filter_by_address, Addressable};
use crate::error::Result;
use crate::port::outbound::CacheStore;

/// Cache lookup for one record list under one key.
pub struct CacheGate<T> {
    store: Option<Arc<dyn CacheStore<T>>>,
    key: String,
}

impl<T> CacheGate<T>
where
    T: Addressable + Clone + Send + Sync + 'static,
{
    /// Gate over `store`; `None` disables caching entirely.
    pub fn new(store: Option<Arc<dyn CacheStore<T>>>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Cached records, narrowed to `addresses` when given.
    ///
    /// `None` means the caller must compute. An empty list means the cache
    /// answered and nothing matched.
    pub async fn fetch(&self, addresses: Option<&[Address]>) -> Result<Option<Vec<T>>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };

        match store.fetch(&self.key).await? {
            Some(cached) => {
                let hits = filter_by_address(cached, addresses);
                debug!(key = %self.key, hits = hits.len(), "Cache hit");
                Ok(Some(hits))
            }
            None => {
                debug!(key = %self.key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Store a freshly computed unfiltered list.
    ///
    /// Write failures are logged and swallowed; the computed result stands.
    pub async fn fill(&self, records: &[T]) {
        let Some(store) = &self.store else {
            return;
        };

        match store.store(&self.key, records.to_vec()).await {
            Ok(()) => debug!(key = %self.key, count = records.len(), "Cache filled"),
            Err(e) => warn!(key = %self.key, error = %e, "Cache write failed"),
        }
    }
}
