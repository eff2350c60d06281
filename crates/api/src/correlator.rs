//! Correlates completed work results back to waiting clients.
//!
//! Results arrive on the notification channel, decoupled in time from the
//! request that caused them. The originating request is embedded in every
//! [`WorkResponse`], so the correlator can re-derive the cache key, the
//! destination uuid, and the pagination spec from the result alone.

use std::sync::Arc;

use axum::extract::ws::Message;
use workbroker_cache::CacheGateway;
use workbroker_core::pagination;
use workbroker_core::types::{response_channel, Pagination, WorkResponse};

use crate::error::AppError;
use crate::ws::ClientHub;

/// Build the delivery frame published on a client's response channel.
pub fn response_frame(uuid: &str, results: Vec<serde_json::Value>) -> Message {
    let frame = serde_json::json!({
        "channel": response_channel(uuid),
        "payload": { "results": results },
    });
    Message::Text(frame.to_string().into())
}

/// Build the error frame published when a request is rejected.
pub fn error_frame(uuid: &str, error: &AppError) -> Message {
    let frame = serde_json::json!({
        "channel": response_channel(uuid),
        "error": { "message": error.to_string(), "code": error.code() },
    });
    Message::Text(frame.to_string().into())
}

/// Routes decoded worker results to cache and to the waiting client.
///
/// Also the delivery path the dispatcher uses for cache hits, so pagination
/// behaves identically whether a result came from cache or from a fresh
/// computation.
pub struct ResponseCorrelator {
    cache: Arc<CacheGateway>,
    hub: Arc<ClientHub>,
}

impl ResponseCorrelator {
    /// Create a correlator over the given cache gateway and client hub.
    pub fn new(cache: Arc<CacheGateway>, hub: Arc<ClientHub>) -> Self {
        Self { cache, hub }
    }

    /// Handle a decoded worker result: write it to cache so a subsequent
    /// identical request short-circuits, then deliver to the live client
    /// context, if any.
    ///
    /// The cache write is last-writer-wins and therefore idempotent under
    /// transport-level redelivery. A store fault is logged and does not
    /// block delivery: the client already waited for this result.
    pub async fn on_work_result(&self, response: WorkResponse) {
        if let Err(e) = self.cache.store_response(&response).await {
            tracing::error!(
                uuid = %response.request.uuid,
                error = %e,
                "Failed to cache work result"
            );
        }

        let uuid = response.request.uuid.clone();
        let pagination = response.request.pagination.clone();
        self.deliver(&uuid, &response, pagination.as_ref()).await;
    }

    /// Best-effort publish of `response` to the channel identified by
    /// `uuid`, applying `pagination` to the result set first when present.
    ///
    /// There is no acknowledgement from the destination; a missing listener
    /// is not an error at this layer.
    pub async fn deliver(&self, uuid: &str, response: &WorkResponse, spec: Option<&Pagination>) {
        let results = match spec {
            Some(spec) => pagination::apply(&response.results, spec),
            None => response.results.clone(),
        };

        let delivered = self.hub.deliver(uuid, response_frame(uuid, results)).await;
        if delivered {
            tracing::info!(uuid, "Response delivered to client");
        } else {
            tracing::debug!(uuid, "No live client for response, delivery skipped");
        }
    }
}
