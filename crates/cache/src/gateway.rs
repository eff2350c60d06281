//! Cache gateway: key derivation and the lookup/store protocol.

use std::sync::Arc;
use std::time::Duration;

use workbroker_core::hashing::object_digest;
use workbroker_core::types::{WorkRequest, WorkResponse};

use crate::store::{CacheStore, CacheStoreError};

/// Default time-to-live for cached responses: 36 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(129_600);

/// Outcome of a cache lookup.
///
/// A miss is an expected control-flow branch, not an error; store faults
/// surface separately as [`CacheStoreError`] and must never be conflated
/// with a miss (a degraded store must not trigger duplicate worker
/// submissions).
#[derive(Debug)]
pub enum CacheLookup {
    Hit(WorkResponse),
    Miss,
}

/// Front door to the response cache.
///
/// Owns the key-derivation convention: a SHA-256 digest over
/// `{experimentId, body, sandboxId}`, where the sandbox id is process-wide
/// deployment scope folded into every key to prevent cross-tenant reads.
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
    sandbox_id: String,
    ttl: Duration,
}

impl CacheGateway {
    /// Create a gateway over `store` scoped to `sandbox_id`, with the
    /// default 36-hour TTL.
    pub fn new(store: Arc<dyn CacheStore>, sandbox_id: impl Into<String>) -> Self {
        Self {
            store,
            sandbox_id: sandbox_id.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the TTL applied by [`store_response`](Self::store_response).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Derive the cache key for a request identity.
    ///
    /// Identical `(experimentId, body, sandboxId)` triples always produce
    /// identical keys; any field difference produces a different key with
    /// cryptographic-hash probability.
    pub fn key_for(&self, request: &WorkRequest) -> String {
        object_digest(&serde_json::json!({
            "experimentId": request.experiment_id,
            "body": request.body,
            "sandboxId": self.sandbox_id,
        }))
    }

    /// Look up a previously computed response for `request`.
    pub async fn lookup(&self, request: &WorkRequest) -> Result<CacheLookup, CacheStoreError> {
        let key = self.key_for(request);
        tracing::debug!(uuid = %request.uuid, key = %key, "Looking up response in cache");

        match self.store.get(&key).await? {
            Some(value) => {
                let response: WorkResponse = serde_json::from_value(value)?;
                Ok(CacheLookup::Hit(response))
            }
            None => Ok(CacheLookup::Miss),
        }
    }

    /// Store a computed response under the key derived from its originating
    /// request. Overwrites any existing value (last-writer-wins).
    pub async fn store_response(&self, response: &WorkResponse) -> Result<(), CacheStoreError> {
        let key = self.key_for(&response.request);
        tracing::debug!(
            uuid = %response.request.uuid,
            key = %key,
            ttl_secs = self.ttl.as_secs(),
            "Storing response in cache"
        );

        let value = serde_json::to_value(response)?;
        self.store.set(&key, value, self.ttl).await
    }
}
