//! Cache store port.

use async_trait::async_trait;

use crate::error::Result;

/// Keyed store of pre-computed record lists.
///
/// The store owns expiry; callers only read and write whole lists. Writes to
/// a key replace the previous list.
#[async_trait]
pub trait CacheStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Return the list cached under `key`, or `None` on a miss.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<T>>>;

    /// Replace the list cached under `key`.
    async fn store(&self, key: &str, records: Vec<T>) -> Result<()>;
}
