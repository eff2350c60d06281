use std::sync::Arc;

use workbroker_cache::CacheGateway;

use crate::config::ServerConfig;
use crate::correlator::ResponseCorrelator;
use crate::notifications::NotificationRouter;
use crate::queue::WorkQueue;
use crate::ws::ClientHub;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Content-addressed response cache.
    pub cache: Arc<CacheGateway>,
    /// WebSocket connection hub (client delivery channels).
    pub hub: Arc<ClientHub>,
    /// Fire-and-forget worker pool submission channel.
    pub queue: Arc<dyn WorkQueue>,
    /// Correlates completed results back to waiting clients.
    pub correlator: Arc<ResponseCorrelator>,
    /// Classifies and routes inbound notification envelopes.
    pub notifications: Arc<NotificationRouter>,
}
