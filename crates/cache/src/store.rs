//! The external key-value store contract.

use std::time::Duration;

use async_trait::async_trait;

/// Failure talking to the cache store.
///
/// Deliberately does not have a "not found" variant: absence is an expected
/// outcome and is expressed as `Ok(None)` from [`CacheStore::get`], never as
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum CacheStoreError {
    /// The store backend failed (connection, protocol, internal fault).
    #[error("Cache store error: {0}")]
    Backend(String),

    /// A stored value could not be (de)serialized.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value store with per-entry TTL.
///
/// Injected into [`CacheGateway`](crate::CacheGateway) as a trait object so
/// tests and single-node deployments can substitute [`MemoryStore`]
/// (crate::MemoryStore) for an external engine. TTL expiry is enforced by
/// the store, not by callers.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent/expired.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheStoreError>;

    /// Store `value` under `key` with the given time-to-live, overwriting
    /// any existing value unconditionally.
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl: Duration,
    ) -> Result<(), CacheStoreError>;
}
